//! Errors returned by the engine's direct API.

use thiserror::Error;

use siege_core::error::{ConfigError, WallError};
use siege_core::types::{MobileId, UnitId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Wall(#[from] WallError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no hostile unit with id {0:?}")]
    UnknownUnit(UnitId),
    #[error("no mobile entity with id {0:?}")]
    UnknownMobile(MobileId),
}
