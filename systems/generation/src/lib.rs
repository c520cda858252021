#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Recursive-backtracking maze generator.
//!
//! Carving walks the sub-lattice of odd-offset cells two steps at a time,
//! opening the wall cell between the current cell and each newly visited
//! neighbour. A cell counts as unvisited exactly while it is still a wall, so
//! no separate visited set is kept. The resulting path network is a spanning
//! tree over the lattice: every path cell is reachable from the start and no
//! loops exist.
//!
//! The traversal uses an explicit frame stack instead of call recursion. A
//! frame shuffles its neighbour offsets when it is entered and a parent only
//! resumes its remaining offsets once the child frame is exhausted, which is
//! exactly the visiting and shuffling order of the recursive formulation.

use log::debug;
use maze_escape_core::{validate_dimensions, CellCoord, CellState, Grid, GridError};
use rand::{seq::SliceRandom, Rng};

/// Cell every maze is carved from; it becomes the player's start cell.
pub const START_CELL: CellCoord = CellCoord::new(1, 1);

/// Two-cell displacement toward a neighbouring lattice cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CarveOffset {
    columns: i32,
    rows: i32,
}

impl CarveOffset {
    /// Two cells toward decreasing columns.
    pub const WEST: Self = Self::new(-2, 0);
    /// Two cells toward increasing columns.
    pub const EAST: Self = Self::new(2, 0);
    /// Two cells toward decreasing rows.
    pub const NORTH: Self = Self::new(0, -2);
    /// Two cells toward increasing rows.
    pub const SOUTH: Self = Self::new(0, 2);

    const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    /// Column displacement of the offset.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Row displacement of the offset.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }
}

/// Neighbour offsets in the order they are presented to the shuffle.
pub const CARVE_OFFSETS: [CarveOffset; 4] = [
    CarveOffset::WEST,
    CarveOffset::EAST,
    CarveOffset::NORTH,
    CarveOffset::SOUTH,
];

/// Source of the per-cell permutation applied to [`CARVE_OFFSETS`].
pub trait DirectionShuffle {
    /// Reorders the offsets in place.
    fn shuffle(&mut self, offsets: &mut [CarveOffset; 4]);
}

impl<S> DirectionShuffle for &mut S
where
    S: DirectionShuffle + ?Sized,
{
    fn shuffle(&mut self, offsets: &mut [CarveOffset; 4]) {
        (**self).shuffle(offsets);
    }
}

/// Uniform shuffle backed by a random number generator.
///
/// Delegates to [`SliceRandom::shuffle`], which performs a Fisher-Yates
/// shuffle, so every permutation is equally likely.
#[derive(Debug)]
pub struct FisherYates<R> {
    rng: R,
}

impl<R: Rng> FisherYates<R> {
    /// Wraps the provided random number generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DirectionShuffle for FisherYates<R> {
    fn shuffle(&mut self, offsets: &mut [CarveOffset; 4]) {
        offsets.shuffle(&mut self.rng);
    }
}

/// Deterministic shuffle that replays a fixed list of permutations.
///
/// Each permutation lists source indices: `[1, 0, 2, 3]` swaps the first two
/// offsets. The script repeats once exhausted; an empty script keeps the
/// canonical order. Intended for reproducing specific layouts.
#[derive(Clone, Debug, Default)]
pub struct ScriptedShuffle {
    permutations: Vec<[usize; 4]>,
    cursor: usize,
    calls: usize,
}

impl ScriptedShuffle {
    /// Creates a shuffle that cycles through the provided permutations.
    ///
    /// Entries that are not permutations of `0..4` are replaced with the identity.
    #[must_use]
    pub fn new(permutations: Vec<[usize; 4]>) -> Self {
        let permutations = permutations
            .into_iter()
            .map(|permutation| {
                if is_permutation(permutation) {
                    permutation
                } else {
                    [0, 1, 2, 3]
                }
            })
            .collect();
        Self {
            permutations,
            cursor: 0,
            calls: 0,
        }
    }

    /// Creates a shuffle that never reorders the offsets.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Number of times the generator requested a permutation.
    #[must_use]
    pub const fn calls(&self) -> usize {
        self.calls
    }
}

impl DirectionShuffle for ScriptedShuffle {
    fn shuffle(&mut self, offsets: &mut [CarveOffset; 4]) {
        self.calls += 1;
        if self.permutations.is_empty() {
            return;
        }

        let permutation = self.permutations[self.cursor];
        self.cursor = (self.cursor + 1) % self.permutations.len();
        let original = *offsets;
        for (slot, source) in offsets.iter_mut().zip(permutation) {
            *slot = original[source];
        }
    }
}

fn is_permutation(candidate: [usize; 4]) -> bool {
    let mut seen = [false; 4];
    for index in candidate {
        match seen.get_mut(index) {
            Some(flag) if !*flag => *flag = true,
            _ => return false,
        }
    }
    true
}

/// Builds a maze of the requested dimensions carved from [`START_CELL`].
///
/// Dimensions must be odd and at least 3; anything else is rejected with
/// [`GridError::InvalidConfiguration`] rather than producing a malformed maze.
pub fn generate<S>(width: u32, height: u32, shuffle: &mut S) -> Result<Grid, GridError>
where
    S: DirectionShuffle + ?Sized,
{
    validate_dimensions(width, height)?;

    let mut grid = Grid::new(width, height)?;
    grid.set_cell(START_CELL, CellState::Path)?;
    carve(&mut grid, START_CELL, shuffle)?;

    debug!(
        "generated {width}x{height} maze with {} path cells",
        grid.path_cells().count()
    );
    Ok(grid)
}

/// Carves passages outward from `start`, which must already be a path cell.
///
/// A neighbour two cells away is opened when it lies strictly inside
/// `(0, width) x (0, height)` and is still a wall; the cell between the two is
/// opened as well.
pub fn carve<S>(grid: &mut Grid, start: CellCoord, shuffle: &mut S) -> Result<(), GridError>
where
    S: DirectionShuffle + ?Sized,
{
    let _ = grid.cell(start)?;
    let mut stack = vec![Frame::enter(start, shuffle)];

    while let Some(frame) = stack.last_mut() {
        let Some(offset) = frame.next_offset() else {
            let _ = stack.pop();
            continue;
        };
        let cell = frame.cell;

        let Some(target) = interior_target(grid, cell, offset) else {
            continue;
        };
        if grid.cell(target)? != CellState::Wall {
            continue;
        }
        let Some(midpoint) = cell.offset(offset.columns() / 2, offset.rows() / 2) else {
            continue;
        };

        grid.set_cell(midpoint, CellState::Path)?;
        grid.set_cell(target, CellState::Path)?;
        stack.push(Frame::enter(target, shuffle));
    }

    Ok(())
}

fn interior_target(grid: &Grid, cell: CellCoord, offset: CarveOffset) -> Option<CellCoord> {
    let target = cell.offset(offset.columns(), offset.rows())?;
    let inside = target.column() > 0
        && target.column() < grid.width()
        && target.row() > 0
        && target.row() < grid.height();
    inside.then_some(target)
}

#[derive(Debug)]
struct Frame {
    cell: CellCoord,
    offsets: [CarveOffset; 4],
    next: usize,
}

impl Frame {
    fn enter<S>(cell: CellCoord, shuffle: &mut S) -> Self
    where
        S: DirectionShuffle + ?Sized,
    {
        let mut offsets = CARVE_OFFSETS;
        shuffle.shuffle(&mut offsets);
        Self {
            cell,
            offsets,
            next: 0,
        }
    }

    fn next_offset(&mut self) -> Option<CarveOffset> {
        let offset = self.offsets.get(self.next).copied()?;
        self.next += 1;
        Some(offset)
    }
}
