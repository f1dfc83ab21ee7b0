//! ECS systems that operate on the siege world each frame.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! passes). Unit state lives in components; shared inputs such as the wall
//! registry and the planner are passed in by the engine.

pub mod cleanup;
pub mod gap_guard;
pub mod movement;
pub mod retarget;
pub mod retreat;
pub mod snapshot;
