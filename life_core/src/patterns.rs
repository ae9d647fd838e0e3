// patterns.rs - Named starting patterns, placed as seed points

use crate::seed::format_seed_points;

pub struct Pattern {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    /// Living cells as (x, y) offsets from the pattern's top-left corner
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        width: 3,
        height: 3,
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        width: 3,
        height: 1,
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        width: 4,
        height: 2,
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        width: 4,
        height: 4,
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        width: 13,
        height: 13,
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        width: 3,
        height: 3,
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        width: 36,
        height: 9,
        cells: &[
            (24, 0),
            (22, 1), (24, 1),
            (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
            (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
            (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
            (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
            (10, 6), (16, 6), (24, 6),
            (11, 7), (15, 7),
            (12, 8), (13, 8),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// Points of the pattern centered on a `width` x `height` grid. A pattern
    /// larger than the grid is anchored at the origin and later clipped by
    /// seeding.
    pub fn centered(&self, width: usize, height: usize) -> Vec<(i64, i64)> {
        let left = width.saturating_sub(self.width) / 2;
        let top = height.saturating_sub(self.height) / 2;

        self.cells
            .iter()
            .map(|&(x, y)| ((left + x) as i64, (top + y) as i64))
            .collect()
    }

    /// Seed text for the pattern centered on the given grid size.
    pub fn seed_text(&self, width: usize, height: usize) -> String {
        format_seed_points(&self.centered(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::rule::RuleTable;
    use crate::seed::{parse_seed_points, seed_grid};
    use crate::step::next_generation;

    fn place(name: &str, width: usize, height: usize) -> Grid {
        let pattern = find(name).unwrap();
        let points = parse_seed_points(&pattern.seed_text(width, height)).unwrap();
        seed_grid(width, height, &points).unwrap()
    }

    fn advance(grid: &Grid, generations: usize) -> Grid {
        (0..generations).fold(grid.clone(), |g, _| next_generation(&g, &RuleTable::CONWAY))
    }

    #[test]
    fn test_declared_bounds_match_cells() {
        for pattern in PATTERNS {
            let max_x = pattern.cells.iter().map(|c| c.0).max().unwrap();
            let max_y = pattern.cells.iter().map(|c| c.1).max().unwrap();
            assert_eq!(max_x + 1, pattern.width, "{}", pattern.name);
            assert_eq!(max_y + 1, pattern.height, "{}", pattern.name);
        }
    }

    #[test]
    fn test_centered_placement() {
        let points = find("blinker").unwrap().centered(11, 11);
        assert_eq!(points, vec![(4, 5), (5, 5), (6, 5)]);
    }

    #[test]
    fn test_oscillator_periods() {
        for (name, period) in [("Blinker", 2), ("Toad", 2), ("Beacon", 2), ("Pulsar", 3)] {
            let start = place(name, 20, 20);
            assert_ne!(advance(&start, 1), start, "{name} should change");
            assert_eq!(advance(&start, period), start, "{name} period");
        }
    }

    #[test]
    fn test_oversized_pattern_is_clipped() {
        let grid = place("Gosper Glider Gun", 20, 5);
        assert!(grid.live_count() > 0);
        assert!(grid.live_count() < find("Gosper Glider Gun").unwrap().cells.len());
    }
}
