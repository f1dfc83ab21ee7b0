//! ECS components for hecs entities.
//!
//! Components are plain data structs. Decision logic lives in `siege-ai`,
//! scheduling lives in the sim systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{MobileId, TargetRef};

/// Marks an entity as a hostile unit converging on the fortress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile {
    pub kind: EnemyKind,
    pub archetype: Archetype,
}

/// Ground-plane position component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundPosition(pub DVec2);

/// Per-unit targeting state. Created at spawn, mutated by retarget ticks
/// and the gap guard, destroyed with the unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetAcquisitionState {
    /// `None` means "move toward the fortress center".
    pub current_target: Option<TargetRef>,
    /// Last destination handed to the path planner.
    pub destination: Option<DVec2>,
    pub is_retreating: bool,
    /// One-tick latch set by the gap guard, cleared by the next retarget tick.
    pub gap_blocked: bool,
    /// Seconds until the next scheduled retarget tick.
    pub retarget_timer: f64,
}

/// A friendly defender, worker or refugee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobileEntity {
    pub id: MobileId,
    pub kind: MobileKind,
    pub position: DVec2,
    pub is_dead: bool,
}

/// Read-only view of the three mobile entity providers for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileSnapshot<'a> {
    pub defenders: &'a [MobileEntity],
    pub workers: &'a [MobileEntity],
    pub refugees: &'a [MobileEntity],
}

impl<'a> MobileSnapshot<'a> {
    /// All living entities across the three providers.
    pub fn living(&self) -> impl Iterator<Item = &'a MobileEntity> + 'a {
        let (defenders, workers, refugees) = (self.defenders, self.workers, self.refugees);
        defenders
            .iter()
            .chain(workers)
            .chain(refugees)
            .filter(|m| !m.is_dead)
    }

    /// Living entity with the given id, if it still exists.
    pub fn find_living(&self, id: MobileId) -> Option<&'a MobileEntity> {
        self.living().find(|m| m.id == id)
    }

    /// Closest living entity to `point`, optionally limited to `max_range`.
    pub fn nearest_living(&self, point: DVec2, max_range: Option<f64>) -> Option<&'a MobileEntity> {
        let mut best: Option<(&MobileEntity, f64)> = None;
        for mobile in self.living() {
            let dist = mobile.position.distance(point);
            if max_range.is_some_and(|r| dist > r) {
                continue;
            }
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((mobile, dist));
            }
        }
        best.map(|(m, _)| m)
    }
}
