use thiserror::Error;

#[derive(Error, Debug)]
pub enum WattsplitError {
    #[error("Length mismatch: {left} values vs {right} values")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    #[error("Empty signal: {0}")]
    EmptySignal(String),

    #[error("Invalid interval: on time {on} must precede off time {off}")]
    InvalidInterval { on: f64, off: f64 },

    #[error("Misaligned phases: {0}")]
    MisalignedPhases(String),

    #[error("Harmonic index {index} out of range ({available} components)")]
    HarmonicOutOfRange { index: usize, available: usize },

    #[error("Feature error: {0}")]
    Feature(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, WattsplitError>;
