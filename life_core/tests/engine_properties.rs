//! Properties of the step engine and seeding that hold for any grid.

use life_core::seed::{parse_seed_points, seed_grid};
use life_core::{Grid, RuleTable, State, live_neighbors, next_generation};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), proptest::collection::vec(any::<bool>(), w * h)))
        .prop_map(|(w, h, alive)| {
            let mut grid = Grid::empty(w, h).unwrap();
            for (i, &living) in alive.iter().enumerate() {
                if living {
                    grid.set_state(i % w, i / w, State::Living);
                }
            }
            grid
        })
}

proptest! {
    #[test]
    fn step_keeps_dimensions_and_coordinates(grid in arb_grid(), seed in any::<u64>()) {
        let rule = RuleTable::random(&mut ChaCha8Rng::seed_from_u64(seed));
        let next = next_generation(&grid, &rule);

        prop_assert_eq!(next.width(), grid.width());
        prop_assert_eq!(next.height(), grid.height());
        for (y, row) in next.rows().enumerate() {
            prop_assert_eq!(row.len(), grid.width());
            for (x, cell) in row.iter().enumerate() {
                prop_assert_eq!((cell.x, cell.y), (x, y));
            }
        }
    }

    #[test]
    fn neighbor_counts_stay_in_range(grid in arb_grid()) {
        for cell in grid.cells() {
            prop_assert!(live_neighbors(&grid, cell.x, cell.y) <= 8);
        }
    }

    #[test]
    fn empty_rule_reaches_fixed_point_in_one_step(grid in arb_grid()) {
        let once = next_generation(&grid, &RuleTable::EMPTY);
        prop_assert_eq!(once.live_count(), 0);
        prop_assert_eq!(next_generation(&once, &RuleTable::EMPTY), once);
    }

    #[test]
    fn seeding_never_fails_on_out_of_range_points(
        w in 1usize..10,
        h in 1usize..10,
        points in proptest::collection::vec((-20i64..20, -20i64..20), 0..40),
    ) {
        let grid = seed_grid(w, h, &points).unwrap();
        let in_range = |&(x, y): &(i64, i64)| x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h;
        for &(x, y) in points.iter().filter(|p| in_range(p)) {
            prop_assert_eq!(grid.get(x as usize, y as usize).unwrap().state, State::Living);
        }
        let distinct: std::collections::HashSet<_> = points.iter().filter(|p| in_range(p)).collect();
        prop_assert_eq!(grid.live_count(), distinct.len());
    }
}

#[test]
fn corner_cells_are_diagonal_neighbors() {
    let mut grid = Grid::empty(6, 4).unwrap();
    grid.set_state(0, 0, State::Living);
    grid.set_state(5, 3, State::Living);

    assert_eq!(live_neighbors(&grid, 0, 0), 1);
    assert_eq!(live_neighbors(&grid, 5, 3), 1);
}

#[test]
fn seed_filtering_example() {
    let points = parse_seed_points("[-1,0],[0,0],[5,5]").unwrap();
    let grid = seed_grid(5, 5, &points).unwrap();

    let living: Vec<_> = grid
        .cells()
        .iter()
        .filter(|c| c.state == State::Living)
        .map(|c| (c.x, c.y))
        .collect();
    assert_eq!(living, vec![(0, 0)]);
}
