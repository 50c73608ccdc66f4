use thiserror::Error;

/// Failures surfaced by scenario construction and the gravity solver.
///
/// Everything downstream of integration (battery, relay, station-keeping)
/// saturates instead of failing.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("bodies {first} and {second} occupy the same point")]
    CoincidentBodies { first: String, second: String },

    #[error("invalid body {name}: {reason}")]
    InvalidBody { name: String, reason: &'static str },

    #[error("invalid satellite {name}: {reason}")]
    InvalidSatellite { name: String, reason: &'static str },

    #[error("invalid scenario {name}: {reason}")]
    InvalidScenario { name: String, reason: &'static str },

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("unknown body: {0}")]
    UnknownBody(String),

    #[error("at least two celestial bodies are needed when sun and ground base are implicit")]
    MissingBodies,

    #[error("scenario file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario format error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, SimError>;
