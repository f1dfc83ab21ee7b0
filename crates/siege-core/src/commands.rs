//! Commands accepted by the engine at tick boundaries.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, MobileKind};
use crate::types::{MobileId, WallId};

/// Host-side instructions. Processed in order at the start of the next tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SiegeCommand {
    /// Start construction of a wall segment.
    BuildWall {
        center: DVec2,
        orientation: DVec2,
        half_span: f64,
        max_hp: f64,
    },
    /// Finish construction; the segment starts blocking.
    CompleteWall { wall: WallId },
    /// Apply damage reported by the combat layer.
    DamageWall { wall: WallId, amount: f64 },
    DestroyWall { wall: WallId },
    RepairWall { wall: WallId },
    /// Spawn a hostile unit at a ground position.
    SpawnHostile { kind: EnemyKind, position: DVec2 },
    /// Spawn a defender, worker or refugee.
    SpawnMobile { kind: MobileKind, position: DVec2 },
    /// Mark a mobile entity dead.
    KillMobile { mobile: MobileId },
    /// Night begins: every active hostile retreats.
    Nightfall,
    /// Day begins again.
    Daybreak,
}
