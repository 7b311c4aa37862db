//! Error types for startup paths (catalog, scenario and config loading).
//!
//! The per-tick simulation never fails; anything that can go wrong is
//! rejected before the engine is built.

use thiserror::Error;

use crate::catalog::UnitType;

#[derive(Debug, Error)]
pub enum SteelfrontError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog entry: {0}")]
    InvalidCatalog(String),

    #[error("vehicle {0:?} is not fielded by this side")]
    UnknownVehicle(UnitType),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

pub type Result<T> = std::result::Result<T, SteelfrontError>;
