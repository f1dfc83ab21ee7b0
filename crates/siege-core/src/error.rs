//! Error types for the fallible edges of the engine.
//!
//! Targeting decisions never fail; missing data degrades to "head to the
//! fortress center". Errors only surface from registry mutations and
//! configuration loading.

use thiserror::Error;

use crate::types::WallId;

/// Rejected wall registry mutation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WallError {
    #[error("no wall with id {0:?}")]
    UnknownWall(WallId),
    #[error("wall {0:?} is already destroyed")]
    AlreadyDestroyed(WallId),
    #[error("wall {0:?} is not destroyed")]
    NotDestroyed(WallId),
    #[error("wall {0:?} is not under construction")]
    NotUnderConstruction(WallId),
    #[error("invalid wall segment: {0}")]
    InvalidSegment(&'static str),
}

/// Configuration that failed to parse or validate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse siege config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
