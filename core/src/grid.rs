//! Dense wall/path grid that stores the maze layout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CellCoord;

/// State of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Solid cell that blocks traversal and is rendered as a cube.
    Wall,
    /// Open cell that the player may walk through.
    Path,
}

/// Errors raised when constructing or addressing a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The requested cell lies outside `[0, width) x [0, height)`.
    #[error("cell ({column}, {row}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column of the rejected cell.
        column: u32,
        /// Row of the rejected cell.
        row: u32,
        /// Number of columns in the grid.
        width: u32,
        /// Number of rows in the grid.
        height: u32,
    },
    /// The grid dimensions cannot host a maze.
    #[error("invalid maze dimensions {width}x{height}: both must be odd and at least 3")]
    InvalidConfiguration {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
}

/// Rectangular matrix of wall and path cells stored in row-major order.
///
/// Dimensions are fixed at construction. Every access is bounds-checked and
/// reports [`GridError::OutOfBounds`] instead of panicking, so carving code
/// must keep its targets strictly inside the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid of the provided dimensions with every cell set to [`CellState::Wall`].
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let invalid = GridError::InvalidConfiguration { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }

        let columns = usize::try_from(width).map_err(|_| invalid)?;
        let rows = usize::try_from(height).map_err(|_| invalid)?;
        let count = columns.checked_mul(rows).ok_or(invalid)?;

        Ok(Self {
            width,
            height,
            cells: vec![CellState::Wall; count],
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the coordinate addresses a cell inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Reads the state of the provided cell.
    pub fn cell(&self, cell: CellCoord) -> Result<CellState, GridError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Overwrites the state of the provided cell.
    pub fn set_cell(&mut self, cell: CellCoord, state: CellState) -> Result<(), GridError> {
        let index = self.index(cell)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Reports whether the cell exists and is open for traversal.
    #[must_use]
    pub fn is_path(&self, cell: CellCoord) -> bool {
        matches!(self.cell(cell), Ok(CellState::Path))
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let columns = self.width as usize;
        self.cells.iter().enumerate().map(move |(index, state)| {
            let column = (index % columns) as u32;
            let row = (index / columns) as u32;
            (CellCoord::new(column, row), *state)
        })
    }

    /// Iterates over the coordinates of every wall cell in row-major order.
    pub fn wall_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells()
            .filter(|(_, state)| *state == CellState::Wall)
            .map(|(cell, _)| cell)
    }

    /// Iterates over the coordinates of every path cell in row-major order.
    pub fn path_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells()
            .filter(|(_, state)| *state == CellState::Path)
            .map(|(cell, _)| cell)
    }

    fn index(&self, cell: CellCoord) -> Result<usize, GridError> {
        if !self.contains(cell) {
            return Err(GridError::OutOfBounds {
                column: cell.column(),
                row: cell.row(),
                width: self.width,
                height: self.height,
            });
        }

        let row = cell.row() as usize;
        let column = cell.column() as usize;
        Ok(row * self.width as usize + column)
    }
}
