#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game session state for Maze Escape.
//!
//! A [`GameSession`] owns the generated maze layout, the player, the exit gate
//! and the random stream that drives layout generation. Adapters mutate it
//! exclusively through [`apply`] and read it through the [`query`] module.
//! Every command runs to completion before returning, so a movement step,
//! including its win check, is never observed half applied.

pub mod collision;
pub mod layout;
pub mod spatial;

use log::{info, trace, warn};
use maze_escape_core::{
    validate_dimensions, Command, Direction, Event, GridError, SessionConfig, SessionStatus,
};
use maze_escape_system_generation::FisherYates;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::{
    collision::{attempt_move, check_win, step_delta},
    layout::{MazeLayout, Player},
};

/// Receives session lifecycle notifications derived from world events.
///
/// Presentation layers implement this to react to the session without the
/// world knowing anything about them.
pub trait SessionListener {
    /// Called once a new maze is ready for play.
    fn on_start(&mut self) {}

    /// Called when the player reaches the exit gate.
    fn on_win(&mut self) {}

    /// Called when the previous session was discarded.
    fn on_restart(&mut self) {}
}

/// Forwards the lifecycle events contained in `events` to `listener`, in order.
pub fn notify<L>(events: &[Event], listener: &mut L)
where
    L: SessionListener + ?Sized,
{
    for event in events {
        match event {
            Event::SessionStarted { .. } => listener.on_start(),
            Event::GateReached => listener.on_win(),
            Event::SessionRestarted => listener.on_restart(),
            _ => {}
        }
    }
}

/// State that only exists while a maze is in play.
#[derive(Debug)]
struct ActiveMaze {
    layout: MazeLayout,
    player: Player,
}

/// Represents the authoritative Maze Escape session state.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    rng: ChaCha8Rng,
    status: SessionStatus,
    active: Option<ActiveMaze>,
}

impl GameSession {
    /// Creates an idle session that will generate mazes using `config`.
    pub fn new(config: SessionConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self::seeded(config))
    }

    fn seeded(config: SessionConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            status: SessionStatus::Idle,
            active: None,
        }
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        let SessionConfig { width, height, .. } = self.config;
        let mut shuffle = FisherYates::new(&mut self.rng);

        match MazeLayout::generate(width, height, &mut shuffle) {
            Ok(layout) => {
                let walls = layout.walls().len();
                let player = Player::at(layout.player_spawn());
                self.active = Some(ActiveMaze { layout, player });
                self.status = SessionStatus::Playing;
                info!("started {width}x{height} maze with {walls} walls");
                out_events.push(Event::SessionStarted {
                    width,
                    height,
                    walls,
                });
            }
            Err(error) => {
                warn!("maze generation failed: {error}");
                self.active = None;
                self.status = SessionStatus::Idle;
                out_events.push(Event::ConfigurationRejected { width, height });
            }
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.active = None;
        self.status = SessionStatus::Idle;
        info!("session restarted");
        out_events.push(Event::SessionRestarted);
        self.start(out_events);
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.status != SessionStatus::Playing {
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let outcome = attempt_move(&active.player, step_delta(direction), active.layout.walls());
        if !outcome.accepted {
            trace!("{direction:?} step blocked at {}", active.player.position());
            out_events.push(Event::MoveBlocked { direction });
            return;
        }

        active.player.move_to(outcome.position);
        out_events.push(Event::PlayerMoved { direction });

        let reached = check_win(
            &active.player.bounding_box(),
            &active.layout.exit().bounding_box(),
        );
        if reached {
            self.status = SessionStatus::Won;
            info!("player reached the exit gate");
            out_events.push(Event::GateReached);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::seeded(SessionConfig::default())
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut GameSession, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMaze { width, height } => {
            if let Err(error) = validate_dimensions(width, height) {
                warn!("{error}");
                out_events.push(Event::ConfigurationRejected { width, height });
                return;
            }
            session.config.width = width;
            session.config.height = height;
            out_events.push(Event::MazeConfigured { width, height });
        }
        Command::StartSession => session.start(out_events),
        Command::RestartSession => session.restart(out_events),
        Command::MovePlayer { direction } => session.move_player(direction, out_events),
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use glam::Vec3;
    use maze_escape_core::{CellCoord, Grid, SessionConfig, SessionStatus};

    use super::{
        layout::{ExitGate, MazeLayout, WallInstance},
        GameSession,
    };

    /// Current lifecycle state of the session.
    #[must_use]
    pub fn status(session: &GameSession) -> SessionStatus {
        session.status
    }

    /// Configuration used for the next generated maze.
    #[must_use]
    pub fn config(session: &GameSession) -> SessionConfig {
        session.config
    }

    /// Layout of the maze in play, if any.
    #[must_use]
    pub fn layout(session: &GameSession) -> Option<&MazeLayout> {
        session.active.as_ref().map(|active| &active.layout)
    }

    /// Grid of the maze in play, if any.
    #[must_use]
    pub fn grid(session: &GameSession) -> Option<&Grid> {
        layout(session).map(MazeLayout::grid)
    }

    /// Wall cubes of the maze in play; empty while idle.
    #[must_use]
    pub fn walls(session: &GameSession) -> &[WallInstance] {
        layout(session).map(MazeLayout::walls).unwrap_or_default()
    }

    /// Exit gate of the maze in play, if any.
    #[must_use]
    pub fn exit_gate(session: &GameSession) -> Option<&ExitGate> {
        layout(session).map(MazeLayout::exit)
    }

    /// Current centre of the player cube, if a maze is in play.
    #[must_use]
    pub fn player_position(session: &GameSession) -> Option<Vec3> {
        session
            .active
            .as_ref()
            .map(|active| active.player.position())
    }

    /// Grid cell currently containing the player's centre, if any.
    #[must_use]
    pub fn player_cell(session: &GameSession) -> Option<CellCoord> {
        let active = session.active.as_ref()?;
        active.layout.cell_at(active.player.position())
    }
}
