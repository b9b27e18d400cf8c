//! Configuration for alignment and grouping operations

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Vec2;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for layout operations
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distances at or below this are treated as zero
    pub tolerance: f64,

    /// Name given to containers created by grouping
    pub container_name: String,

    /// Pivot of newly created containers
    pub container_pivot: Vec2,

    /// Whether group/ungroup replace the active selection with their result
    pub select_result: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            container_name: "container".to_string(),
            container_pivot: Vec2::HALF,
            select_result: true,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    pub fn with_container_pivot(mut self, pivot: Vec2) -> Self {
        self.container_pivot = pivot;
        self
    }

    pub fn with_select_result(mut self, select: bool) -> Self {
        self.select_result = select;
        self
    }
}
