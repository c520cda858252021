use std::collections::VecDeque;

use maze_escape_core::{CellCoord, CellState, Grid, GridError};
use maze_escape_system_generation::{
    generate, CarveOffset, DirectionShuffle, FisherYates, ScriptedShuffle, CARVE_OFFSETS,
    START_CELL,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SIZES: [(u32, u32); 6] = [(5, 5), (7, 5), (5, 9), (11, 11), (21, 15), (31, 17)];

fn seeded(seed: u64) -> FisherYates<ChaCha8Rng> {
    FisherYates::new(ChaCha8Rng::seed_from_u64(seed))
}

fn render(grid: &Grid) -> String {
    let mut rows = Vec::new();
    for row in 0..grid.height() {
        let line: String = (0..grid.width())
            .map(|column| {
                if grid.is_path(CellCoord::new(column, row)) {
                    ' '
                } else {
                    '#'
                }
            })
            .collect();
        rows.push(line);
    }
    rows.join("\n")
}

fn reachable_from_start(grid: &Grid) -> usize {
    let mut visited = vec![false; (grid.width() * grid.height()) as usize];
    let mut queue = VecDeque::from([START_CELL]);
    let index = |cell: CellCoord| (cell.row() * grid.width() + cell.column()) as usize;
    visited[index(START_CELL)] = true;
    let mut count = 0;

    while let Some(cell) = queue.pop_front() {
        count += 1;
        for (columns, rows) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let Some(neighbor) = cell.offset(columns, rows) else {
                continue;
            };
            if grid.is_path(neighbor) && !visited[index(neighbor)] {
                visited[index(neighbor)] = true;
                queue.push_back(neighbor);
            }
        }
    }

    count
}

fn lattice_cells(width: u32, height: u32) -> usize {
    (((width - 1) / 2) * ((height - 1) / 2)) as usize
}

#[test]
fn every_path_cell_is_reachable_from_start() {
    for (width, height) in SIZES {
        for seed in 0..16 {
            let grid = generate(width, height, &mut seeded(seed)).expect("valid dimensions");
            let path_cells = grid.path_cells().count();

            assert_eq!(
                reachable_from_start(&grid),
                path_cells,
                "{width}x{height} seed {seed} left unreachable path cells",
            );
        }
    }
}

#[test]
fn border_cells_remain_walls() {
    for (width, height) in SIZES {
        for seed in 0..16 {
            let grid = generate(width, height, &mut seeded(seed)).expect("valid dimensions");

            for (cell, state) in grid.cells() {
                let on_border = cell.column() == 0
                    || cell.row() == 0
                    || cell.column() == width - 1
                    || cell.row() == height - 1;
                if on_border {
                    assert_eq!(
                        state,
                        CellState::Wall,
                        "{width}x{height} seed {seed} opened border cell {cell:?}",
                    );
                }
            }
        }
    }
}

#[test]
fn carving_produces_a_spanning_tree_over_the_lattice() {
    for (width, height) in SIZES {
        let grid = generate(width, height, &mut seeded(7)).expect("valid dimensions");
        let nodes = lattice_cells(width, height);

        for row in (1..height).step_by(2) {
            for column in (1..width).step_by(2) {
                assert!(grid.is_path(CellCoord::new(column, row)));
            }
        }

        // A tree over n lattice cells opens exactly n - 1 connecting cells.
        assert_eq!(grid.path_cells().count(), nodes + nodes - 1);
    }
}

#[test]
fn identity_shuffle_produces_known_layout() {
    let mut shuffle = ScriptedShuffle::identity();
    let grid = generate(5, 5, &mut shuffle).expect("valid dimensions");

    let expected = ["#####", "#   #", "### #", "#   #", "#####"].join("\n");
    assert_eq!(render(&grid), expected);
    assert_eq!(shuffle.calls(), lattice_cells(5, 5));
}

#[test]
fn scripted_shuffle_is_reproducible() {
    let script = vec![[3, 1, 0, 2], [2, 0, 3, 1], [1, 3, 2, 0]];
    let first = generate(11, 9, &mut ScriptedShuffle::new(script.clone())).expect("valid");
    let second = generate(11, 9, &mut ScriptedShuffle::new(script)).expect("valid");

    assert_eq!(first, second);
}

#[test]
fn same_seed_yields_same_layout() {
    let first = generate(21, 15, &mut seeded(42)).expect("valid dimensions");
    let second = generate(21, 15, &mut seeded(42)).expect("valid dimensions");

    assert_eq!(first, second);
}

#[test]
fn start_cell_is_always_open() {
    for seed in 0..8 {
        let grid = generate(21, 15, &mut seeded(seed)).expect("valid dimensions");
        assert_eq!(grid.cell(START_CELL), Ok(CellState::Path));
    }
}

#[test]
fn smallest_maze_contains_only_the_start_cell() {
    let grid = generate(3, 3, &mut ScriptedShuffle::identity()).expect("valid dimensions");

    assert_eq!(grid.path_cells().collect::<Vec<_>>(), vec![START_CELL]);
}

#[test]
fn invalid_dimensions_are_rejected_before_generation() {
    for (width, height) in [(0, 5), (4, 5), (5, 6), (1, 1), (2, 2)] {
        let mut shuffle = ScriptedShuffle::identity();
        let result = generate(width, height, &mut shuffle);

        assert_eq!(
            result,
            Err(GridError::InvalidConfiguration { width, height })
        );
        assert_eq!(shuffle.calls(), 0);
    }
}

#[test]
fn explicit_stack_matches_recursive_traversal() {
    fn recursive_carve(grid: &mut Grid, cell: CellCoord, shuffle: &mut dyn DirectionShuffle) {
        let mut offsets = CARVE_OFFSETS;
        shuffle.shuffle(&mut offsets);
        for offset in offsets {
            let Some(target) = cell.offset(offset.columns(), offset.rows()) else {
                continue;
            };
            let interior = target.column() > 0
                && target.row() > 0
                && target.column() < grid.width()
                && target.row() < grid.height();
            if !interior || grid.cell(target) != Ok(CellState::Wall) {
                continue;
            }
            let midpoint = cell
                .offset(offset.columns() / 2, offset.rows() / 2)
                .expect("midpoint lies between two interior cells");
            grid.set_cell(midpoint, CellState::Path).expect("in bounds");
            grid.set_cell(target, CellState::Path).expect("in bounds");
            recursive_carve(grid, target, shuffle);
        }
    }

    for seed in 0..8 {
        let expected = {
            let mut grid = Grid::new(15, 11).expect("valid dimensions");
            grid.set_cell(START_CELL, CellState::Path).expect("in bounds");
            recursive_carve(&mut grid, START_CELL, &mut seeded(seed));
            grid
        };
        let actual = generate(15, 11, &mut seeded(seed)).expect("valid dimensions");

        assert_eq!(actual, expected, "seed {seed} diverged from recursion");
    }
}

#[test]
fn carve_offsets_cover_all_four_neighbours() {
    assert_eq!(
        CARVE_OFFSETS,
        [
            CarveOffset::WEST,
            CarveOffset::EAST,
            CarveOffset::NORTH,
            CarveOffset::SOUTH
        ]
    );
    for offset in CARVE_OFFSETS {
        assert_eq!(offset.columns().abs() + offset.rows().abs(), 2);
    }
}
