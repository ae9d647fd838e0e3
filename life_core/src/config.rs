// config.rs - Per-run simulation settings

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{LifeError, Result};

/// Settings read once each time a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells
    pub width: usize,

    /// Grid height in cells
    pub height: usize,

    /// Target interval between generations, in milliseconds.
    ///
    /// The clock never runs faster than this; when a step takes longer the
    /// next one starts immediately and the reported rate drops.
    pub time_step_ms: u64,

    /// Side of one cell on the canvas, in pixels
    pub pixel_size: usize,

    /// Living cells of the first generation as `[x, y]` pairs, comma separated
    pub seed_points: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            time_step_ms: 50,
            pixel_size: 4,
            seed_points: "[1, 0],\n[2, 1],\n[0, 2],\n[1, 2],\n[2, 2]".into(),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn time_step(&self) -> Duration {
        Duration::from_millis(self.time_step_ms)
    }

    /// Reject sizes that cannot produce a grid or a canvas.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("pixel_size", self.pixel_size),
        ] {
            if value == 0 {
                return Err(LifeError::InvalidDimension { name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_pixel_size_rejected() {
        let config = SimulationConfig { pixel_size: 0, ..SimulationConfig::new() };
        assert!(matches!(
            config.validate(),
            Err(LifeError::InvalidDimension { name: "pixel_size" })
        ));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            width = 40
            time_step_ms = 0
            seed_points = "[0, 0], [1, 1]"
            "#,
        )
        .unwrap();

        assert_eq!(config.width, 40);
        assert_eq!(config.height, 100);
        assert_eq!(config.time_step(), Duration::ZERO);
        assert_eq!(config.seed_points, "[0, 0], [1, 1]");
    }

    #[test]
    fn test_negative_width_is_a_config_error() {
        let result = SimulationConfig::from_toml_str("width = -3");
        assert!(matches!(result, Err(LifeError::Config(_))));
    }
}
