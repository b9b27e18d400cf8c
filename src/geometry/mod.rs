//! Geometry primitives, anchor/pivot arithmetic and bounds aggregation

pub mod anchor;
pub mod bounds;
pub mod types;

pub use anchor::WorldTransform;
pub use bounds::BoundsSource;
pub use types::*;
