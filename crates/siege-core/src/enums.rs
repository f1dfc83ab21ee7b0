//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Behavioral class of a hostile unit, fixed at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Close-combat infantry.
    Melee,
    /// Heavy melee that specializes in walls. Shares the melee policy.
    WallBreaker,
    /// Bow and crossbow units that shoot over distance.
    Ranged,
    /// Suicide bombers and artillery. Ignores mobile entities entirely.
    Siege,
}

/// Concrete enemy type as spawned by the wave system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Orc,
    Troll,
    BowOrc,
    SuicideGoblin,
    GoblinCannoneer,
    WarBoss,
}

impl EnemyKind {
    /// Archetype that drives this kind's targeting.
    pub fn archetype(self) -> Archetype {
        match self {
            EnemyKind::Orc | EnemyKind::WarBoss => Archetype::Melee,
            EnemyKind::Troll => Archetype::WallBreaker,
            EnemyKind::BowOrc => Archetype::Ranged,
            EnemyKind::SuicideGoblin | EnemyKind::GoblinCannoneer => Archetype::Siege,
        }
    }
}

/// Friendly mobile entity categories the hostiles may hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobileKind {
    Defender,
    Worker,
    Refugee,
}

/// Which direction estimator the melee policy consults before a breach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApproachModel {
    /// Coarse spoke sampling with ring grouping.
    #[default]
    Rings,
    /// Per-degree ray crossing counts from the cost field.
    RayCost,
}

/// Day/night cycle as signalled by the host game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}
