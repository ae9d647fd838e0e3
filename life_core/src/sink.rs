// sink.rs - Where generations go once computed

use crate::grid::{Grid, State};

/// Canvas dimensions in pixels for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width_px: usize,
    pub height_px: usize,
    pub pixel_size: usize,
}

impl CanvasSize {
    pub fn for_grid(width: usize, height: usize, pixel_size: usize) -> Self {
        Self {
            width_px: width * pixel_size,
            height_px: height * pixel_size,
            pixel_size,
        }
    }
}

/// One generation handed to a sink. Generation 0 is the seeded grid.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub generation: u64,
    pub grid: &'a Grid,
}

/// Instantaneous stepping rate reported after each generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate {
    /// Generations per second, `None` when the effective interval is zero
    pub fps: Option<f64>,
    /// True when the step took longer than the target interval
    pub degraded: bool,
}

/// A filled square for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: usize,
    pub top: usize,
    pub size: usize,
    pub state: State,
}

/// Squares of side `pixel_size` at `(x * pixel_size, y * pixel_size)`, one per cell.
pub fn cell_rects(grid: &Grid, pixel_size: usize) -> impl Iterator<Item = CellRect> + '_ {
    grid.cells().iter().map(move |cell| CellRect {
        left: cell.x * pixel_size,
        top: cell.y * pixel_size,
        size: pixel_size,
        state: cell.state,
    })
}

/// Receiver of frames from the simulation clock.
///
/// Called from the clock's task, never concurrently for the same run.
pub trait FrameSink: Send + Sync {
    /// Called once per run, before the first frame.
    fn resize(&self, _canvas: CanvasSize) {}

    fn present(&self, frame: Frame<'_>);

    fn report_rate(&self, _rate: FrameRate) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_scales_by_pixel_size() {
        let canvas = CanvasSize::for_grid(30, 20, 3);
        assert_eq!((canvas.width_px, canvas.height_px), (90, 60));
    }

    #[test]
    fn test_cell_rects_cover_grid() {
        let mut grid = Grid::empty(3, 2).unwrap();
        grid.set_state(2, 1, State::Living);

        let rects: Vec<_> = cell_rects(&grid, 5).collect();

        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0], CellRect { left: 0, top: 0, size: 5, state: State::Dead });
        assert_eq!(rects[5], CellRect { left: 10, top: 5, size: 5, state: State::Living });
    }
}
