use thiserror::Error;

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Everything the engine can refuse to do.
///
/// Crashes and orbit insertion are *not* errors; they are flight phases.
/// Only configuration mistakes, bad step sizes and numerical breakdowns end
/// up here, and none of them is retried by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error("invalid time step {0} s (must be finite and non-negative)")]
    InvalidTimeStep(f64),

    #[error("non-finite {quantity} at t={sim_time_s:.3} s, step rejected")]
    NonFinite {
        quantity: &'static str,
        sim_time_s: f64,
    },

    #[error("orbit undefined for state at r={radius_km} km from Earth's center")]
    DegenerateState { radius_km: f64 },

    #[error("flight halted after earlier fault ({cause}); relaunch to continue")]
    Halted { cause: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
