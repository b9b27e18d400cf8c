//! Rect Arrange CLI
//!
//! Usage:
//!   rect-arrange [OPTIONS] <SCENE> <COMMAND>
//!
//! Commands:
//!   commands                         List the toolbar commands in order
//!   report                           Print every node's world rectangle
//!   apply <COMMAND> <NODE>... [-o]   Run a command on the named nodes
//!   bounds <NODE>...                 Print the combined bounds of the named nodes
//!
//! Options:
//!   -c, --config <FILE>  Layout configuration (TOML format)
//!   -v, --verbose        Log operation details to stderr
//!   -h, --help           Print help

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{debug, Level};

use rect_arrange::geometry::bounds::selection_bounds;
use rect_arrange::scene::{world_report, SceneFileError};
use rect_arrange::{
    CommandContext, CommandRegistry, ConfigError, LayoutConfig, LayoutError, NodeId, Scene,
    SceneError, SceneFile,
};

#[derive(Parser)]
#[command(name = "rect-arrange")]
#[command(about = "Align, distribute and group anchored rectangles")]
struct Cli {
    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log operation details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Scene document (TOML format)
    scene: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered commands in toolbar order
    Commands,
    /// Print every node's world rectangle
    Report,
    /// Run a command on the named nodes, in the order given
    Apply {
        /// Command id, e.g. align-left or group
        command: String,
        /// Node names forming the selection
        #[arg(required = true)]
        nodes: Vec<String>,
        /// Write the resulting scene document here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the combined bounds of the named nodes
    Bounds {
        #[arg(required = true)]
        nodes: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config '{path}': {source}")]
    Config { path: PathBuf, source: ConfigError },
    #[error("scene '{path}': {source}")]
    SceneFile {
        path: PathBuf,
        source: SceneFileError,
    },
    #[error("no node named '{0}'")]
    UnknownNode(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("writing '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let CliError::Layout(err) = &e {
            if let Some(suggestions) = err.suggestions().filter(|s| !s.is_empty()) {
                eprintln!("  did you mean: {}", suggestions.join(", "));
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => LayoutConfig::from_file(path).map_err(|source| CliError::Config {
            path: path.clone(),
            source,
        })?,
        None => LayoutConfig::default(),
    };

    let mut scene = SceneFile::from_file(&cli.scene)
        .and_then(|file| file.build())
        .map_err(|source| CliError::SceneFile {
            path: cli.scene.clone(),
            source,
        })?;
    debug!(nodes = scene.len(), "scene loaded");

    match cli.command {
        Command::Commands => {
            for command in CommandRegistry::standard().iter() {
                println!("{:<26}{}", command.id, command.label);
            }
        }
        Command::Report => {
            print!("{}", world_report(&scene)?);
        }
        Command::Apply {
            command,
            nodes,
            output,
        } => {
            let selection = resolve(&scene, &nodes)?;
            let registry = CommandRegistry::standard();
            let mut ctx = CommandContext {
                scene: &mut scene,
                selection: &selection,
                config: &config,
            };
            let result = registry.run(&command, &mut ctx)?;
            debug!(selected = result.len(), "command finished");

            print!("{}", world_report(&scene)?);
            if let Some(path) = output {
                let document = SceneFile::from_scene(&scene)
                    .and_then(|file| file.to_toml())
                    .map_err(|source| CliError::SceneFile {
                        path: path.clone(),
                        source,
                    })?;
                fs::write(&path, document).map_err(|source| CliError::Write { path, source })?;
            }
        }
        Command::Bounds { nodes } => {
            let selection = resolve(&scene, &nodes)?;
            let bounds = selection_bounds(&scene, &selection)?;
            let size = bounds.size();
            println!(
                "min=({:.2}, {:.2}) max=({:.2}, {:.2}) size=({:.2}, {:.2})",
                bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y, size.x, size.y
            );
        }
    }
    Ok(())
}

fn resolve(scene: &Scene, names: &[String]) -> Result<Vec<NodeId>, CliError> {
    names
        .iter()
        .map(|name| {
            scene
                .find(name)
                .ok_or_else(|| CliError::UnknownNode(name.clone()))
        })
        .collect()
}
