//! Cellular automaton engine: a toroidal grid of living/dead cells evolved by
//! an editable rule table on a timed, cancellable loop.

pub mod clock;
pub mod config;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rule;
pub mod seed;
pub mod sink;
pub mod step;

pub use clock::{ClockState, Pacing, SimulationClock};
pub use config::SimulationConfig;
pub use error::{LifeError, Result};
pub use grid::{Cell, Grid, State};
pub use rule::{RuleHandle, RuleTable};
pub use sink::{CanvasSize, CellRect, Frame, FrameRate, FrameSink};
pub use step::{live_neighbors, next_generation};
