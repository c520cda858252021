#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Escape engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game session, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! and presentation layers to react to. The maze itself is stored in a
//! [`Grid`] of wall and path cells.

mod grid;

pub use grid::{CellState, Grid, GridError};

use serde::{Deserialize, Serialize};

/// Canonical banner shown on the start overlay.
pub const WELCOME_BANNER: &str = "Welcome to Maze Escape.";

/// Message shown once the player reaches the exit gate.
pub const WIN_MESSAGE: &str = "You Win!";

/// Number of maze columns used when no configuration is supplied.
pub const DEFAULT_MAZE_WIDTH: u32 = 21;

/// Number of maze rows used when no configuration is supplied.
pub const DEFAULT_MAZE_HEIGHT: u32 = 15;

/// Seed used for the layout generator when no configuration is supplied.
pub const DEFAULT_SEED: u64 = 0x6d61_7a65_5f65_7363;

/// Side length of a single maze cell expressed in world units.
pub const CELL_SIZE: f32 = 1.0;

/// Distance covered by a single accepted movement step.
///
/// Movement is event driven: each recognised key press yields exactly one
/// step of this length rather than a per-frame velocity.
pub const STEP_DISTANCE: f32 = 0.2;

/// Edge length of the player's cube.
pub const PLAYER_SIZE: f32 = 0.5;

/// Edge length of the exit gate's cube.
pub const GATE_SIZE: f32 = 1.0;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the cell displaced by the provided signed offset, if it stays non-negative.
    #[must_use]
    pub fn offset(self, columns: i32, rows: i32) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(columns)?;
        let row = self.row.checked_add_signed(rows)?;
        Some(CellCoord::new(column, row))
    }
}

/// Cardinal movement directions on the maze floor.
///
/// North points toward decreasing rows, which maps to the negative z axis in
/// world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

/// Lifecycle state of the game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    /// No maze has been generated yet; the start overlay is showing.
    #[default]
    Idle,
    /// A maze is active and movement commands are evaluated.
    Playing,
    /// The player reached the exit gate; movement is ignored until restart.
    Won,
}

/// Configuration that seeds a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Number of maze columns. Must be odd and at least 3.
    pub width: u32,
    /// Number of maze rows. Must be odd and at least 3.
    pub height: u32,
    /// Seed for the deterministic layout generator.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAZE_WIDTH,
            height: DEFAULT_MAZE_HEIGHT,
            seed: DEFAULT_SEED,
        }
    }
}

impl SessionConfig {
    /// Validates that the dimensions can host a carved maze.
    ///
    /// Carving walks the odd-offset sub-lattice starting from `(1, 1)`, so both
    /// dimensions must be odd and leave room for a wall border.
    pub fn validate(&self) -> Result<(), GridError> {
        validate_dimensions(self.width, self.height)
    }
}

/// Rejects maze dimensions that would break the odd-coordinate carve invariant.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), GridError> {
    let valid = |value: u32| value >= 3 && value % 2 == 1;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(GridError::InvalidConfiguration { width, height })
    }
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Updates the dimensions used by the next generated maze.
    ConfigureMaze {
        /// Number of maze columns.
        width: u32,
        /// Number of maze rows.
        height: u32,
    },
    /// Generates a maze and places the player at the start cell.
    StartSession,
    /// Discards all session state and generates a fresh maze.
    RestartSession,
    /// Requests a single movement step in the provided direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that new maze dimensions were stored.
    MazeConfigured {
        /// Number of maze columns.
        width: u32,
        /// Number of maze rows.
        height: u32,
    },
    /// Reports that requested maze dimensions were rejected.
    ConfigurationRejected {
        /// Rejected number of maze columns.
        width: u32,
        /// Rejected number of maze rows.
        height: u32,
    },
    /// Announces that a freshly generated maze is ready for play.
    SessionStarted {
        /// Number of maze columns.
        width: u32,
        /// Number of maze rows.
        height: u32,
        /// Number of wall instances derived from the grid.
        walls: usize,
    },
    /// Announces that the previous session was discarded.
    SessionRestarted,
    /// Confirms that the player advanced one step.
    PlayerMoved {
        /// Direction of the accepted step.
        direction: Direction,
    },
    /// Reports that a step was discarded because it would hit a wall.
    MoveBlocked {
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Announces that the player's box touched the exit gate.
    GateReached,
}
