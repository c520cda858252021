//! World-space placement of the maze grid, the player and the exit gate.
//!
//! Cells are laid out on the x/z plane with the grid centred on the origin:
//! the centre of cell `(column, row)` sits at
//! `column * size - width * size / 2 + size / 2` along x and the equivalent
//! expression along z. Cubes rest on the floor, so their y coordinate equals
//! half their edge length.

use glam::Vec3;
use maze_escape_core::{
    validate_dimensions, CellCoord, Grid, GridError, CELL_SIZE, GATE_SIZE, PLAYER_SIZE,
};
use maze_escape_system_generation::{generate, DirectionShuffle, START_CELL};

use crate::spatial::Aabb;

/// Solid unit cube derived from a single wall cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallInstance {
    cell: CellCoord,
    position: Vec3,
}

impl WallInstance {
    /// Grid cell the wall was derived from.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Centre of the wall cube in world space.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Bounding box of the wall cube.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::cube(self.position, CELL_SIZE)
    }
}

/// Player cube that moves freely across the maze floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    position: Vec3,
}

impl Player {
    /// Creates a player centred on the provided position.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self { position }
    }

    /// Current centre of the player cube.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    pub(crate) fn move_to(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Bounding box of the player cube at its current position.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::cube(self.position, PLAYER_SIZE)
    }
}

/// Exit gate the player needs to touch to win.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitGate {
    cell: CellCoord,
    position: Vec3,
}

impl ExitGate {
    /// Grid cell occupied by the gate.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Centre of the gate cube in world space.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Bounding box of the gate cube.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::cube(self.position, GATE_SIZE)
    }
}

/// Generated maze together with its derived world-space geometry.
#[derive(Clone, Debug)]
pub struct MazeLayout {
    grid: Grid,
    walls: Vec<WallInstance>,
    exit: ExitGate,
}

impl MazeLayout {
    /// Generates a maze and derives one wall instance per remaining wall cell.
    pub fn generate<S>(width: u32, height: u32, shuffle: &mut S) -> Result<Self, GridError>
    where
        S: DirectionShuffle + ?Sized,
    {
        let grid = generate(width, height, shuffle)?;
        Self::from_grid(grid)
    }

    /// Derives the world-space layout of an existing grid.
    ///
    /// The grid dimensions must satisfy the same odd-size rules as generation.
    pub fn from_grid(grid: Grid) -> Result<Self, GridError> {
        validate_dimensions(grid.width(), grid.height())?;

        let walls = grid
            .wall_cells()
            .map(|cell| WallInstance {
                cell,
                position: cell_center(&grid, cell),
            })
            .collect();
        let exit_cell = exit_cell(&grid);
        let exit = ExitGate {
            cell: exit_cell,
            position: resting_on_floor(cell_center(&grid, exit_cell), GATE_SIZE),
        };

        Ok(Self { grid, walls, exit })
    }

    /// Carved grid backing the layout.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Wall cubes in row-major grid order.
    #[must_use]
    pub fn walls(&self) -> &[WallInstance] {
        &self.walls
    }

    /// Exit gate placed diagonally opposite the start cell.
    #[must_use]
    pub const fn exit(&self) -> &ExitGate {
        &self.exit
    }

    /// Cell the player starts in.
    #[must_use]
    pub const fn start_cell(&self) -> CellCoord {
        START_CELL
    }

    /// Position at which a fresh player is spawned.
    #[must_use]
    pub fn player_spawn(&self) -> Vec3 {
        resting_on_floor(cell_center(&self.grid, START_CELL), PLAYER_SIZE)
    }

    /// Centre of the provided cell in world space.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec3 {
        cell_center(&self.grid, cell)
    }

    /// Grid cell containing the provided world-space position, if any.
    #[must_use]
    pub fn cell_at(&self, position: Vec3) -> Option<CellCoord> {
        let column = axis_to_index(position.x, self.grid.width())?;
        let row = axis_to_index(position.z, self.grid.height())?;
        Some(CellCoord::new(column, row))
    }
}

fn exit_cell(grid: &Grid) -> CellCoord {
    CellCoord::new(grid.width() - 2, grid.height() - 2)
}

fn cell_center(grid: &Grid, cell: CellCoord) -> Vec3 {
    Vec3::new(
        axis_center(cell.column(), grid.width()),
        CELL_SIZE / 2.0,
        axis_center(cell.row(), grid.height()),
    )
}

fn axis_center(index: u32, cells: u32) -> f32 {
    index as f32 * CELL_SIZE - cells as f32 * CELL_SIZE / 2.0 + CELL_SIZE / 2.0
}

fn axis_to_index(coordinate: f32, cells: u32) -> Option<u32> {
    let shifted = (coordinate + cells as f32 * CELL_SIZE / 2.0) / CELL_SIZE;
    if !shifted.is_finite() || shifted < 0.0 {
        return None;
    }
    let index = shifted.floor() as u32;
    (index < cells).then_some(index)
}

fn resting_on_floor(center: Vec3, size: f32) -> Vec3 {
    Vec3::new(center.x, size / 2.0, center.z)
}
