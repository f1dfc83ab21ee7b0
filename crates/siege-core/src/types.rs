//! Fundamental identifiers and simulation types.
//!
//! Ground-plane positions are `glam::DVec2` throughout: x = East, y = depth
//! (North). The western map edge is the minimum x.

use serde::{Deserialize, Serialize};

/// Stable identifier of a wall segment inside a `WallRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(pub u32);

/// Identifier of a mobile entity (defender, worker or refugee).
/// The sim layer stores the bit pattern of its ECS entity here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MobileId(pub u64);

/// Identifier of a hostile unit. The sim layer stores the bit pattern of
/// its ECS entity here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u64);

/// What a hostile unit is currently attacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum TargetRef {
    Wall(WallId),
    Mobile(MobileId),
}

impl TargetRef {
    /// The wall id if this target is a wall.
    pub fn wall(&self) -> Option<WallId> {
        match self {
            TargetRef::Wall(id) => Some(*id),
            TargetRef::Mobile(_) => None,
        }
    }

    /// The mobile id if this target is a mobile entity.
    pub fn mobile(&self) -> Option<MobileId> {
        match self {
            TargetRef::Mobile(id) => Some(*id),
            TargetRef::Wall(_) => None,
        }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
