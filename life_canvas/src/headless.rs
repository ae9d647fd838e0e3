// headless.rs - Run the clock without a window, printing generations as text

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use life_core::{ClockState, Frame, FrameRate, FrameSink, RuleHandle, SimulationClock, SimulationConfig};
use tokio::runtime::Runtime;
use tokio::sync::Notify;

use crate::CanvasError;

/// Prints each generation as an `O`/`X` block and signals once `limit`
/// generations have been shown, or as soon as a write fails.
pub struct TerminalSink<W> {
    limit: u64,
    out: Mutex<W>,
    failed: Mutex<Option<io::Error>>,
    done: Notify,
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, limit: u64) -> Self {
        Self {
            limit,
            out: Mutex::new(out),
            failed: Mutex::new(None),
            done: Notify::new(),
        }
    }

    fn take_failure(&self) -> Option<io::Error> {
        self.failed.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

impl<W: Write + Send> FrameSink for TerminalSink<W> {
    fn present(&self, frame: Frame<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        match writeln!(out, "generation {}\n{}\n", frame.generation, frame.grid) {
            Ok(()) if frame.generation >= self.limit => self.done.notify_one(),
            Ok(()) => {}
            Err(err) => {
                self.failed
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(err);
                self.done.notify_one();
            }
        }
    }

    fn report_rate(&self, rate: FrameRate) {
        if let Some(fps) = rate.fps {
            tracing::debug!(degraded = rate.degraded, "FPS: {fps:.2}");
        }
    }
}

pub fn run(runtime: Runtime, config: &SimulationConfig, rules: RuleHandle, generations: u64) -> Result<(), CanvasError> {
    let sink = Arc::new(TerminalSink::new(io::stdout(), generations));
    drive(&runtime, config, rules, sink)
}

fn drive<W: Write + Send + 'static>(
    runtime: &Runtime,
    config: &SimulationConfig,
    rules: RuleHandle,
    sink: Arc<TerminalSink<W>>,
) -> Result<(), CanvasError> {
    let mut clock = SimulationClock::new(runtime.handle().clone(), rules, sink.clone());

    runtime.block_on(async {
        clock.start(config)?;
        tokio::select! {
            _ = sink.done.notified() => {}
            _ = stopped(&clock) => {}
        }

        let generation = clock.generation();
        let ended = clock.state() == ClockState::Stopped;
        clock.stop();

        if let Some(err) = sink.take_failure() {
            return Err(CanvasError::Output(err));
        }
        if ended {
            return Err(CanvasError::LoopEnded(generation));
        }
        Ok(())
    })
}

/// Resolves once the clock's loop is no longer running.
async fn stopped(clock: &SimulationClock) {
    let mut ticks = tokio::time::interval(Duration::from_millis(10));
    while clock.state() == ClockState::Running {
        ticks.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::{Grid, LifeError, RuleTable};

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Exploding;

    impl Write for Exploding {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            panic!("terminal went away");
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    fn blinker() -> SimulationConfig {
        SimulationConfig {
            width: 5,
            height: 5,
            time_step_ms: 1,
            pixel_size: 1,
            seed_points: "[1, 2], [2, 2], [3, 2]".into(),
        }
    }

    #[tokio::test]
    async fn test_signals_once_limit_reached() {
        let sink = TerminalSink::new(Vec::new(), 2);
        let grid = Grid::empty(3, 3).unwrap();

        sink.present(Frame { generation: 1, grid: &grid });
        let early = tokio::time::timeout(Duration::from_millis(20), sink.done.notified()).await;
        assert!(early.is_err());

        sink.present(Frame { generation: 2, grid: &grid });
        let reached = tokio::time::timeout(Duration::from_millis(20), sink.done.notified()).await;
        assert!(reached.is_ok());

        let printed = String::from_utf8(sink.out.lock().unwrap().clone()).unwrap();
        assert!(printed.starts_with("generation 1\nXXX\nXXX\nXXX\n"));
    }

    #[test]
    fn test_run_returns_after_requested_generations() {
        let sink = Arc::new(TerminalSink::new(Vec::new(), 3));
        drive(&runtime(), &blinker(), RuleHandle::new(RuleTable::CONWAY), sink.clone()).unwrap();

        let printed = String::from_utf8(sink.out.lock().unwrap().clone()).unwrap();
        assert!(printed.contains("generation 3\n"));
    }

    #[test]
    fn test_run_surfaces_bad_seed_text() {
        let config = SimulationConfig { seed_points: "[x, 1]".into(), ..SimulationConfig::default() };

        let result = run(runtime(), &config, RuleHandle::default(), 3);
        assert!(matches!(result, Err(CanvasError::Life(LifeError::MalformedSeedInput(_)))));
    }

    #[test]
    fn test_write_failure_ends_run_with_error() {
        let sink = Arc::new(TerminalSink::new(BrokenPipe, 100));

        let result = drive(&runtime(), &blinker(), RuleHandle::new(RuleTable::CONWAY), sink);
        assert!(matches!(result, Err(CanvasError::Output(err)) if err.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_dead_loop_ends_run_instead_of_hanging() {
        let sink = Arc::new(TerminalSink::new(Exploding, 100));

        let result = drive(&runtime(), &blinker(), RuleHandle::new(RuleTable::CONWAY), sink);
        assert!(matches!(result, Err(CanvasError::LoopEnded(0))));
    }
}
