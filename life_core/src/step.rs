// step.rs - Neighbor counting and one full-grid rule application

use crate::grid::{Cell, Grid};
use crate::rule::RuleTable;

/// The 8 points at Chebyshev distance 1, as (dx, dy).
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Living cells among the 8 toroidal neighbors of (x, y).
pub fn live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let (x, y) = (x as i64, y as i64);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| grid.state_wrapped(x + dx, y + dy).is_living())
        .count() as u8
}

/// Compute the next generation.
///
/// The input grid is only read, so every count sees the same generation.
pub fn next_generation(grid: &Grid, rules: &RuleTable) -> Grid {
    let cells = grid
        .cells()
        .iter()
        .map(|cell| Cell {
            state: rules.next_state(cell.state, live_neighbors(grid, cell.x, cell.y)),
            ..*cell
        })
        .collect();

    Grid::from_cells(grid.width(), grid.height(), cells)
}
