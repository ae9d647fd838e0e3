// clock.rs - Timed stepping loop with start/stop and frame-rate reporting

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::rule::RuleHandle;
use crate::seed;
use crate::sink::{CanvasSize, Frame, FrameRate, FrameSink};
use crate::step::next_generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

/// Scheduling decision after one generation took `elapsed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// Wait before the next generation: `target - elapsed`, floored at zero
    pub delay: Duration,
    /// Interval the rate is computed from: the target, or the elapsed time
    /// when the step ran over
    pub effective: Duration,
    pub rate: FrameRate,
}

impl Pacing {
    pub fn after(target: Duration, elapsed: Duration) -> Self {
        let degraded = elapsed > target;
        let effective = if degraded { elapsed } else { target };
        let fps = (!effective.is_zero()).then(|| 1.0 / effective.as_secs_f64());

        Self {
            delay: target.saturating_sub(elapsed),
            effective,
            rate: FrameRate { fps, degraded },
        }
    }
}

/// Stop request for one run. Cuts a pending wait short; a step already
/// underway is left to finish.
#[derive(Default)]
struct Cancel {
    flag: AtomicBool,
    wake: Notify,
}

impl Cancel {
    fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
        // notify_one keeps a permit if the loop is not waiting yet
        self.wake.notify_one();
    }

    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    async fn wait(&self, delay: Duration) {
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = self.wake.notified() => {}
            }
        }
    }
}

struct Run {
    cancel: Arc<Cancel>,
    active: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Clears the active flag however the loop ends, including by panic.
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
        if std::thread::panicking() {
            tracing::error!("simulation loop failed; clock stopped");
        }
    }
}

/// Drives repeated generations on a tokio runtime.
///
/// At most one run exists at a time, and a run does not touch the sink until
/// the task of the run before it has ended. The rule handle is read once per
/// generation, so edits made through another clone of it show up no later
/// than the next step.
pub struct SimulationClock {
    runtime: Handle,
    rules: RuleHandle,
    sink: Arc<dyn FrameSink>,
    generation: Arc<AtomicU64>,
    run: Option<Run>,
    // Task of the last stopped run, possibly still finishing its step
    previous: Option<JoinHandle<()>>,
}

impl SimulationClock {
    pub fn new(runtime: Handle, rules: RuleHandle, sink: Arc<dyn FrameSink>) -> Self {
        Self {
            runtime,
            rules,
            sink,
            generation: Arc::new(AtomicU64::new(0)),
            run: None,
            previous: None,
        }
    }

    pub fn rules(&self) -> &RuleHandle {
        &self.rules
    }

    pub fn state(&self) -> ClockState {
        match &self.run {
            Some(run) if run.active.load(Ordering::Acquire) => ClockState::Running,
            _ => ClockState::Stopped,
        }
    }

    /// Generations computed by the current (or last) run.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Begin a fresh run from `config`, replacing any run in progress.
    ///
    /// The configuration is fully checked first; on error the current run
    /// (if any) keeps going and the sink sees nothing. On success the clock is
    /// Running at once. The canvas size and generation 0 reach the sink from
    /// the new task, after the previous run's last step has been presented.
    pub fn start(&mut self, config: &SimulationConfig) -> Result<()> {
        let grid = seed::initialize(config)?;

        self.stop();

        let cancel = Arc::new(Cancel::default());
        let active = Arc::new(AtomicBool::new(true));
        self.generation = Arc::new(AtomicU64::new(0));

        let task = self.runtime.spawn(run_loop(
            self.previous.take(),
            CanvasSize::for_grid(config.width, config.height, config.pixel_size),
            grid,
            config.time_step(),
            self.rules.clone(),
            Arc::clone(&self.sink),
            Arc::clone(&cancel),
            ActiveGuard(Arc::clone(&active)),
            Arc::clone(&self.generation),
        ));

        tracing::info!(
            width = config.width,
            height = config.height,
            time_step_ms = config.time_step_ms,
            pixel_size = config.pixel_size,
            "simulation started"
        );

        self.run = Some(Run { cancel, active, task });
        Ok(())
    }

    /// Cancel the pending generation, if any. A generation already being
    /// computed still finishes and is presented.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.cancel.cancel();
            self.previous = Some(run.task);
            tracing::info!(generation = self.generation(), "simulation stopped");
        }
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_loop(
    previous: Option<JoinHandle<()>>,
    canvas: CanvasSize,
    mut grid: Grid,
    target: Duration,
    rules: RuleHandle,
    sink: Arc<dyn FrameSink>,
    cancel: Arc<Cancel>,
    _active: ActiveGuard,
    generation: Arc<AtomicU64>,
) {
    if let Some(previous) = previous {
        // Err only when that loop panicked, which it has already logged
        let _ = previous.await;
    }
    if cancel.is_cancelled() {
        return;
    }

    sink.resize(canvas);
    sink.present(Frame { generation: 0, grid: &grid });

    let mut delay = Duration::ZERO;

    loop {
        cancel.wait(delay).await;
        if cancel.is_cancelled() {
            break;
        }

        let started = Instant::now();

        let table = rules.snapshot();
        grid = next_generation(&grid, &table);
        let n = generation.fetch_add(1, Ordering::AcqRel) + 1;
        sink.present(Frame { generation: n, grid: &grid });

        let pacing = Pacing::after(target, started.elapsed());
        if pacing.rate.degraded {
            tracing::debug!(
                generation = n,
                elapsed_ms = pacing.effective.as_millis() as u64,
                target_ms = target.as_millis() as u64,
                "generation ran over its time step"
            );
        }
        sink.report_rate(pacing.rate);

        if cancel.is_cancelled() {
            break;
        }
        delay = pacing.delay;
    }
}
