// seed.rs - Initial grids from free-text seed points

use rand::Rng;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::grid::{Grid, State};

/// Parse free text such as `[1, 2], [3, 4]` into coordinate pairs.
///
/// The text is treated as the body of a JSON array, so surrounding brackets
/// must be left out. Blank text yields no points.
pub fn parse_seed_points(text: &str) -> Result<Vec<(i64, i64)>> {
    let wrapped = format!("[{text}]");
    Ok(serde_json::from_str(&wrapped)?)
}

/// An empty grid with every in-range point set living. Points outside
/// `[0, width) x [0, height)` are dropped silently.
pub fn seed_grid(width: usize, height: usize, points: &[(i64, i64)]) -> Result<Grid> {
    let mut grid = Grid::empty(width, height)?;

    for &(x, y) in points {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            continue;
        };
        grid.set_state(x, y, State::Living);
    }

    Ok(grid)
}

/// First generation for a run described by `config`.
pub fn initialize(config: &SimulationConfig) -> Result<Grid> {
    config.validate()?;
    let points = parse_seed_points(&config.seed_points)?;
    seed_grid(config.width, config.height, &points)
}

/// Random scatter of points covering the whole grid.
///
/// A density threshold is drawn first, then each position is kept when a
/// fresh draw exceeds it, so sparse and dense fills are equally likely.
pub fn random_seed_points<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<(i64, i64)> {
    let threshold: f64 = rng.gen_range(0.0..1.0);
    let mut points = Vec::new();

    for x in 0..width {
        for y in 0..height {
            if rng.gen_range(0.0..1.0) > threshold {
                points.push((x as i64, y as i64));
            }
        }
    }

    points
}

/// Render points in the seed text format, one `[x, y]` per line.
pub fn format_seed_points(points: &[(i64, i64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("[{x}, {y}]"))
        .collect::<Vec<_>>()
        .join(",\n")
}
