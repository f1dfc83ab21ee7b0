//! Gap guard: stop units squeezing between intact wall segments.
//!
//! The external planner's walkable surface is coarser than the real gaps
//! between fixed-width segments and will happily route a unit through a
//! post gap. Every frame, a unit hugging an intact wall with no breach
//! nearby is redirected to attack that wall instead. The override latches
//! until the unit's next scheduled retarget tick.

use glam::DVec2;

use siege_core::components::TargetAcquisitionState;
use siege_core::config::SiegeConfig;
use siege_core::types::{TargetRef, WallId};
use siege_core::walls::WallRegistry;

/// Input to the guard for a single unit.
pub struct GapContext<'a> {
    pub position: DVec2,
    pub state: &'a TargetAcquisitionState,
    pub walls: Option<&'a WallRegistry>,
    pub config: &'a SiegeConfig,
}

/// Redirect issued by the guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapOverride {
    pub wall: WallId,
    pub destination: DVec2,
}

/// Check one unit. Returns the override to apply, if any.
pub fn check(ctx: &GapContext) -> Option<GapOverride> {
    let config = ctx.config;
    if ctx.state.is_retreating || ctx.state.gap_blocked {
        return None;
    }
    let registry = ctx.walls?;

    // Already through; the walls behind are not in the way.
    if ctx.position.distance(config.fortress_center) < config.interior_radius {
        return None;
    }

    let wall = registry.nearest_wall(ctx.position)?;
    if wall.center.distance(ctx.position) > config.gap_proximity {
        return None;
    }

    let near_breach = registry
        .nearest_destroyed(ctx.position)
        .is_some_and(|b| b.center.distance(ctx.position) <= config.breach_detect_radius);
    if near_breach {
        return None;
    }

    // Already attacking this wall from its face.
    if ctx.state.current_target == Some(TargetRef::Wall(wall.id)) {
        return None;
    }

    Some(GapOverride {
        wall: wall.id,
        destination: wall.outward_face(config.wall_face_offset),
    })
}

/// Latch the override into the unit's state.
pub fn apply(state: &mut TargetAcquisitionState, ov: &GapOverride) {
    state.gap_blocked = true;
    state.current_target = Some(TargetRef::Wall(ov.wall));
    state.destination = Some(ov.destination);
}

/// Release the latch. Called at the start of each scheduled retarget tick.
pub fn release(state: &mut TargetAcquisitionState) {
    state.gap_blocked = false;
}
