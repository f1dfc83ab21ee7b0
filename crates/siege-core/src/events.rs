//! Events emitted by the engine for the host game.

use serde::{Deserialize, Serialize};

use crate::types::{TargetRef, UnitId, WallId};

/// Notifications raised while ticking. Drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SiegeEvent {
    /// A retarget tick or the gap guard picked a new target.
    TargetChanged {
        unit: UnitId,
        target: Option<TargetRef>,
    },
    /// The gap guard caught a unit slipping between intact walls.
    GapBlocked { unit: UnitId, wall: WallId },
    /// A retreating unit reached the western edge; the host may despawn it.
    RetreatArrived { unit: UnitId },
    /// A wall segment was destroyed.
    BreachOpened { wall: WallId },
    /// A destroyed wall segment was restored.
    WallRepaired { wall: WallId },
    /// A new segment finished construction.
    WallCompleted { wall: WallId },
    /// The cost field was rebuilt after a topology change.
    CostFieldRebuilt { max_cost: u32 },
    /// Night began; hostiles were ordered to retreat.
    Nightfall { retreating: u32 },
}
