// main.rs - Rule-editable cellular automaton on a pixel canvas

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use eframe::egui;
use life_core::{LifeError, RuleHandle, RuleTable, SimulationConfig, patterns};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

mod app;
mod canvas;
mod headless;
mod rule_editor;
mod ui;

use app::CanvasApp;

#[derive(Error, Debug)]
enum CanvasError {
    #[error(transparent)]
    Life(#[from] LifeError),

    #[error("failed to start the async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    #[error("window error: {0}")]
    Ui(#[from] eframe::Error),

    #[error("failed to print generation: {0}")]
    Output(std::io::Error),

    #[error("simulation loop ended after {0} generations")]
    LoopEnded(u64),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RulePreset {
    Empty,
    Conway,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "life_canvas", about = "Cellular automaton with an editable rule table")]
struct Args {
    /// TOML file with width, height, time_step_ms, pixel_size and seed_points
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Target milliseconds between generations
    #[arg(long)]
    time_step_ms: Option<u64>,

    #[arg(long)]
    pixel_size: Option<usize>,

    /// Seed with a named pattern instead of the configured points
    #[arg(long)]
    pattern: Option<String>,

    /// Rule table loaded at startup
    #[arg(long, value_enum, default_value_t = RulePreset::Empty)]
    rule: RulePreset,

    /// Seed for random rules and random start points
    #[arg(long)]
    seed: Option<u64>,

    /// Print generations to stdout instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Generations to run in headless mode
    #[arg(long, default_value_t = 10)]
    generations: u64,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig, CanvasError> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(time_step_ms) = self.time_step_ms {
            config.time_step_ms = time_step_ms;
        }
        if let Some(pixel_size) = self.pixel_size {
            config.pixel_size = pixel_size;
        }
        if let Some(name) = &self.pattern {
            let pattern = patterns::find(name).ok_or_else(|| CanvasError::UnknownPattern(name.clone()))?;
            config.seed_points = pattern.seed_text(config.width, config.height);
        }

        Ok(config)
    }
}

fn main() -> Result<(), CanvasError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = args.simulation_config()?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let rules = RuleHandle::new(RuleTable::EMPTY);
    match args.rule {
        RulePreset::Empty => {}
        RulePreset::Conway => rules.load_conway(),
        RulePreset::Random => rules.load_random(&mut rng),
    }

    // One worker keeps the simulation off the UI thread and strictly serial
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("life-clock")
        .enable_all()
        .build()?;

    if args.headless {
        tracing::info!(generations = args.generations, "running headless");
        headless::run(runtime, &config, rules, args.generations)?;
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cellular Automaton",
        options,
        Box::new(move |cc| Box::new(CanvasApp::new(cc.egui_ctx.clone(), runtime, config, rules, rng))),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["life_canvas", "--width", "30", "--pixel-size", "2", "--pattern", "blinker"]);
        let config = args.simulation_config().unwrap();

        assert_eq!(config.width, 30);
        assert_eq!(config.height, 100);
        assert_eq!(config.pixel_size, 2);
        assert_eq!(config.seed_points, "[13, 49],\n[14, 49],\n[15, 49]");
    }

    #[test]
    fn test_unknown_pattern_rejected() {
        let args = Args::parse_from(["life_canvas", "--pattern", "spaceship"]);
        assert!(matches!(args.simulation_config(), Err(CanvasError::UnknownPattern(_))));
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let args = Args::parse_from(["life_canvas", "--config", "/nonexistent/life.toml"]);
        assert!(matches!(args.simulation_config(), Err(CanvasError::Life(LifeError::Io(_)))));
    }
}
