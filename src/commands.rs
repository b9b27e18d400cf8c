//! Command registry for the toolbar operations
//!
//! Commands are registered explicitly through [`CommandRegistryBuilder`] and
//! looked up by id. Handlers receive a [`CommandContext`] carrying the scene,
//! the ordered selection and the configuration, and return the selection that
//! should be active afterwards.

use std::fmt;

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::ops::{align, make_group, ungroup_selection, AlignKind};
use crate::scene::{NodeId, SceneGraph};

/// Everything a command handler may touch
pub struct CommandContext<'a> {
    pub scene: &'a mut dyn SceneGraph,
    /// Selection in the order the user picked it
    pub selection: &'a [NodeId],
    pub config: &'a LayoutConfig,
}

pub type Handler = Box<dyn Fn(&mut CommandContext<'_>) -> Result<Vec<NodeId>, LayoutError>>;

/// A registered command
pub struct CommandDescriptor {
    pub id: String,
    pub label: String,
    /// Position in listings; lower comes first
    pub order: i32,
    handler: Handler,
}

impl CommandDescriptor {
    pub fn run(&self, ctx: &mut CommandContext<'_>) -> Result<Vec<NodeId>, LayoutError> {
        (self.handler)(ctx)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Commands keyed by id, kept sorted by `order`
#[derive(Debug)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

/// Builder collecting command descriptors
#[derive(Debug, Default)]
pub struct CommandRegistryBuilder {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistryBuilder {
    pub fn register<F>(mut self, id: &str, label: &str, order: i32, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>) -> Result<Vec<NodeId>, LayoutError> + 'static,
    {
        // Later registrations replace earlier ones with the same id
        self.commands.retain(|c| c.id != id);
        self.commands.push(CommandDescriptor {
            id: id.to_string(),
            label: label.to_string(),
            order,
            handler: Box::new(handler),
        });
        self
    }

    /// Register an alignment command that keeps the selection unchanged
    pub fn register_align(self, id: &str, label: &str, order: i32, kind: AlignKind) -> Self {
        self.register(id, label, order, move |ctx| {
            align(&mut *ctx.scene, kind, ctx.selection, ctx.config)?;
            Ok(ctx.selection.to_vec())
        })
    }

    pub fn build(mut self) -> CommandRegistry {
        // Stable, so equal orders keep registration order
        self.commands.sort_by_key(|c| c.order);
        CommandRegistry {
            commands: self.commands,
        }
    }
}

impl CommandRegistry {
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::default()
    }

    /// The twelve toolbar commands, in toolbar order
    pub fn standard() -> Self {
        Self::builder()
            .register_align("align-left", "Align Left", 10, AlignKind::Left)
            .register_align("align-right", "Align Right", 20, AlignKind::Right)
            .register_align("align-top", "Align Top", 30, AlignKind::Top)
            .register_align("align-bottom", "Align Bottom", 40, AlignKind::Bottom)
            .register_align(
                "align-horizontal-center",
                "Align Horizontal Center",
                50,
                AlignKind::HorizontalCenter,
            )
            .register_align(
                "align-vertical-center",
                "Align Vertical Center",
                60,
                AlignKind::VerticalCenter,
            )
            .register_align(
                "distribute-horizontal",
                "Distribute Horizontally",
                70,
                AlignKind::Horizontal,
            )
            .register_align(
                "distribute-vertical",
                "Distribute Vertically",
                80,
                AlignKind::Vertical,
            )
            .register_align("size-max", "Match Largest Size", 90, AlignKind::SizeMax)
            .register_align("size-min", "Match Smallest Size", 100, AlignKind::SizeMin)
            .register("group", "Make Group", 110, |ctx| {
                let container = make_group(&mut *ctx.scene, ctx.selection, ctx.config)?;
                Ok(vec![container])
            })
            .register("ungroup", "Ungroup", 120, |ctx| {
                ungroup_selection(&mut *ctx.scene, ctx.selection, ctx.config)
            })
            .build()
    }

    pub fn get(&self, id: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// Commands in listing order
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run command `id`, returning the selection it leaves behind
    pub fn run(&self, id: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<NodeId>, LayoutError> {
        match self.get(id) {
            Some(command) => command.run(ctx),
            None => Err(LayoutError::unknown_command(id, self.similar_ids(id))),
        }
    }

    fn similar_ids(&self, target: &str) -> Vec<String> {
        let mut candidates: Vec<(&str, usize)> = self
            .commands
            .iter()
            .filter_map(|c| {
                let dist = levenshtein_distance(&c.id, target);
                (dist <= 3).then_some((c.id.as_str(), dist))
            })
            .collect();
        candidates.sort_by_key(|(_, d)| *d);
        candidates
            .into_iter()
            .map(|(id, _)| id.to_string())
            .take(3)
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (m, n) = (a_chars.len(), b_chars.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut row = vec![0usize; n + 1];
    for i in 1..=m {
        row[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            row[j] = (prev[j] + 1).min(row[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[n]
}
