//! Per-kind behavioral profiles.
//!
//! Consolidates the parameters the sim needs for each enemy kind.

use siege_core::enums::{Archetype, EnemyKind};

/// Behavioral profile for an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub archetype: Archetype,
    /// Ground speed handed to the path planner (units/s).
    pub move_speed: f64,
}

/// Get the behavioral profile for a given kind.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    let move_speed = match kind {
        EnemyKind::Orc => 3.0,
        EnemyKind::Troll => 2.0,
        EnemyKind::BowOrc => 2.8,
        EnemyKind::SuicideGoblin => 4.5,
        EnemyKind::GoblinCannoneer => 1.8,
        EnemyKind::WarBoss => 2.5,
    };
    EnemyProfile {
        archetype: kind.archetype(),
        move_speed,
    }
}
