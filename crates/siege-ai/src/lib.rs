//! Siege targeting AI.
//!
//! Implements the wall-crossing cost field, the ring-based approach
//! evaluator, per-archetype target acquisition policies, the gap guard and
//! the retreat controller. No ECS dependency; everything operates on plain
//! data from `siege-core`.

pub mod approach;
pub mod cost_field;
pub mod fsm;
pub mod gap_guard;
pub mod policies;
pub mod profiles;
pub mod retreat;
pub mod sight;

pub use siege_core as core;
