//! Engine state snapshot, produced after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SiegeEvent;
use crate::types::{SimTime, TargetRef, UnitId};
use crate::walls::WallSegment;

/// Complete observable state of the siege after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiegeSnapshot {
    pub time: SimTime,
    pub time_of_day: TimeOfDay,
    pub units: Vec<UnitView>,
    pub walls: Vec<WallSegment>,
    /// Highest wall-crossing count of any ray in the cost field.
    pub max_ray_cost: u32,
    pub events: Vec<SiegeEvent>,
}

/// One hostile unit as seen by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub unit: UnitId,
    pub kind: EnemyKind,
    pub position: DVec2,
    pub target: Option<TargetRef>,
    pub destination: Option<DVec2>,
    pub is_retreating: bool,
    pub gap_blocked: bool,
}
