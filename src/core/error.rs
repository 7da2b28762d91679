use thiserror::Error;

/// Errors at the configuration boundary (scenario loading).
///
/// Simulation operations never return these - no path, no ammo, and no
/// cover are sentinels, not faults.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
