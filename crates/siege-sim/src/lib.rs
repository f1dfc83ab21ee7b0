//! Headless siege engine.
//!
//! Owns the hecs world of hostile units and mobile entities, runs the
//! targeting systems at a fixed tick rate, and produces `SiegeSnapshot`s for
//! the host game.

pub mod engine;
pub mod error;
pub mod planner;
pub mod systems;
pub mod topology;
pub mod world_setup;

pub use engine::{SiegeEngine, SimConfig};
pub use error::EngineError;
pub use planner::{DirectPlanner, PathPlanner};
pub use siege_core as core;

#[cfg(test)]
mod tests;
