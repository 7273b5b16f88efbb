//! Error types for the catmouse crate

use thiserror::Error;

/// Main error type for the catmouse crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("grid {axis} must be at least 1, got {value}")]
    InvalidDimension { axis: &'static str, value: usize },

    #[error("{axis} coordinate {value} is outside [0, {bound})")]
    CoordinateOutOfBounds {
        axis: &'static str,
        value: usize,
        bound: usize,
    },

    #[error("state index {index} is outside [0, {num_states})")]
    IndexOutOfRange { index: usize, num_states: usize },

    #[error("action index {index} is outside [0, {num_actions})")]
    InvalidAction { index: usize, num_actions: usize },

    #[error("choice count for action {action} in state {state} is zero when a step size was requested")]
    ZeroChoiceCount { state: usize, action: usize },

    #[error("step size {value} at time-step {step} is outside (0, 1]")]
    InvalidStepSize { value: f64, step: u64 },

    #[error("{name} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

/// Check that `value` is a finite number within `[min, max]`.
pub(crate) fn ensure_in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
