// grid.rs - Toroidal grid of binary-state cells

use std::fmt;

use crate::error::{LifeError, Result};

/// The two states a cell can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Living,
    Dead,
}

impl State {
    pub fn is_living(self) -> bool {
        matches!(self, State::Living)
    }

    pub fn flipped(self) -> State {
        match self {
            State::Living => State::Dead,
            State::Dead   => State::Living,
        }
    }

    /// Character used by the text dump of a grid
    pub fn symbol(self) -> char {
        match self {
            State::Living => 'O',
            State::Dead   => 'X',
        }
    }
}

/// One grid position. Identity is the (x, y) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub state: State,
}

/// HEIGHT rows of WIDTH cells, stored row-major.
///
/// Every cell carries its own coordinates and `cell(x, y)` always returns the
/// cell tagged `(x, y)`. Dimensions never change once the grid exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Wrap a possibly out-of-range coordinate onto a ring of `n` positions.
pub fn wrap(coord: i64, n: usize) -> usize {
    coord.rem_euclid(n as i64) as usize
}

impl Grid {
    /// Build a `width` x `height` grid with every cell dead.
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        if width == 0 {
            return Err(LifeError::InvalidDimension { name: "width" });
        }
        if height == 0 {
            return Err(LifeError::InvalidDimension { name: "height" });
        }

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell { x, y, state: State::Dead }))
            .collect();

        Ok(Self { width, height, cells })
    }

    /// Assemble a grid from cells already laid out row-major.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows in y order, each holding its cells in x order.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    /// State at (x, y) with both coordinates wrapped around the torus.
    pub fn state_wrapped(&self, x: i64, y: i64) -> State {
        let x = wrap(x, self.width);
        let y = wrap(y, self.height);
        self.cells[y * self.width + x].state
    }

    /// Force the state of one cell. Returns `false` (and changes nothing) when
    /// (x, y) lies outside the grid.
    pub fn set_state(&mut self, x: usize, y: usize, state: State) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x].state = state;
        true
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.state.is_living()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.state.symbol())?;
            }
        }
        Ok(())
    }
}
