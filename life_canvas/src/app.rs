// app.rs - Desktop app state and the operator actions behind its buttons

use std::sync::Arc;

use eframe::egui;
use life_core::patterns::PATTERNS;
use life_core::seed::{format_seed_points, random_seed_points};
use life_core::{ClockState, RuleHandle, SimulationClock, SimulationConfig};
use rand_chacha::ChaCha8Rng;
use tokio::runtime::Runtime;

use crate::canvas::{CanvasSink, Palette};

pub struct CanvasApp {
    // Configuration form, read on every start
    pub config: SimulationConfig,
    pub selected_pattern: usize,
    pub palette: Palette,
    pub status: Option<String>,

    pub(crate) rules: RuleHandle,
    pub(crate) sink: Arc<CanvasSink>,
    clock: SimulationClock,
    rng: ChaCha8Rng,

    // Dropped last so the clock's task is cancelled first
    _runtime: Runtime,
}

impl CanvasApp {
    pub fn new(
        ctx: egui::Context,
        runtime: Runtime,
        config: SimulationConfig,
        rules: RuleHandle,
        rng: ChaCha8Rng,
    ) -> Self {
        let sink = Arc::new(CanvasSink::new(ctx));
        let clock = SimulationClock::new(runtime.handle().clone(), rules.clone(), sink.clone());

        Self {
            config,
            selected_pattern: 0,
            palette: Palette::default(),
            status: None,
            rules,
            sink,
            clock,
            rng,
            _runtime: runtime,
        }
    }

    pub fn is_running(&self) -> bool {
        self.clock.state() == ClockState::Running
    }

    pub fn start(&mut self) {
        match self.clock.start(&self.config) {
            Ok(()) => self.status = None,
            Err(err) => {
                tracing::warn!(%err, "start failed");
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn load_conway_rule(&mut self) {
        self.rules.load_conway();
    }

    pub fn load_random_rule(&mut self) {
        self.rules.load_random(&mut self.rng);
    }

    /// Replace the seed text with a random scatter over the configured grid.
    pub fn generate_random_seed_points(&mut self) {
        let points = random_seed_points(self.config.width, self.config.height, &mut self.rng);
        tracing::info!(points = points.len(), "generated random seed points");
        self.config.seed_points = format_seed_points(&points);
    }

    /// Replace the seed text with the selected pattern, centered.
    pub fn apply_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            self.config.seed_points = pattern.seed_text(self.config.width, self.config.height);
            tracing::info!(pattern = pattern.name, "applied pattern");
        }
    }
}
