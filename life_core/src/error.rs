// error.rs - Error kinds surfaced by the automaton engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("invalid dimension: {name} must be greater than 0")]
    InvalidDimension { name: &'static str },

    #[error("malformed seed input: {0}")]
    MalformedSeedInput(#[from] serde_json::Error),

    #[error("invalid rule index: neighbor count {count} is outside 0..=8")]
    InvalidRuleIndex { count: usize },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
