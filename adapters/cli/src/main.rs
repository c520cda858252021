#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Escape experience.

mod config;
mod simulation;
mod terminal;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use maze_escape_core::WELCOME_BANNER;
use maze_escape_rendering::{palette, FrameInput, Presentation, RenderingBackend, Scene};
use maze_escape_rendering_macroquad::MacroquadBackend;
use maze_escape_world::GameSession;

use self::{config::Overrides, simulation::Simulation, terminal::TerminalBackend};

const WINDOW_TITLE: &str = "Maze Escape";

/// Command-line arguments accepted by the Maze Escape binary.
#[derive(Debug, Parser)]
#[command(
    name = "maze-escape",
    about = "Find the exit gate of a procedurally generated maze."
)]
struct Args {
    /// Path to a TOML configuration file with `[maze]` and `[window]` tables.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of maze columns; must be odd and at least 3.
    #[arg(long)]
    width: Option<u32>,
    /// Number of maze rows; must be odd and at least 3.
    #[arg(long)]
    height: Option<u32>,
    /// Seed for the layout generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Play in the terminal instead of opening a window.
    #[arg(long)]
    headless: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL")]
    vsync: Option<bool>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            path: self.config.clone(),
            width: self.width,
            height: self.height,
            seed: self.seed,
            vsync: self.vsync,
        }
    }
}

/// Entry point for the Maze Escape command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let launch = config::resolve(&args.overrides()).context("failed to load configuration")?;
    let session = GameSession::new(launch.session).context("failed to create game session")?;
    info!(
        "{WELCOME_BANNER} {}x{} maze, seed {}",
        launch.session.width, launch.session.height, launch.session.seed
    );

    let mut simulation = Simulation::new(session);
    let update = move |_dt: Duration, input: FrameInput, scene: &mut Scene| {
        if let Err(error) = simulation.advance(&input, scene) {
            error!("scene out of sync with session: {error}");
        }
    };
    let presentation = Presentation::new(WINDOW_TITLE, palette::CLEAR, Scene::new());

    if args.headless {
        TerminalBackend::stdio()
            .run(presentation, update)
            .context("terminal session failed")
    } else {
        MacroquadBackend::new()
            .with_vsync(launch.vsync)
            .run(presentation, update)
            .context("window session failed")
    }
}
