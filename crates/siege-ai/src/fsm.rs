//! Target acquisition state machine.
//!
//! States are implicit in `TargetAcquisitionState`: the current target (a
//! wall, a mobile entity, or nothing meaning "head for the center") plus the
//! retreat flag and the gap latch. Each retarget tick dispatches to the
//! archetype's policy function, which returns the new target and the single
//! destination point for the path planner. No ECS dependency.

use glam::DVec2;

use siege_core::components::{MobileEntity, MobileSnapshot, TargetAcquisitionState};
use siege_core::config::SiegeConfig;
use siege_core::enums::Archetype;
use siege_core::types::TargetRef;
use siege_core::walls::{WallRegistry, WallSegment};

use crate::cost_field::CostField;
use crate::policies;

/// Input to a policy for a single unit.
pub struct TargetContext<'a> {
    pub archetype: Archetype,
    pub position: DVec2,
    pub state: &'a TargetAcquisitionState,
    /// `None` when no registry is available; treated as open ground.
    pub walls: Option<&'a WallRegistry>,
    pub mobiles: MobileSnapshot<'a>,
    pub cost_field: Option<&'a CostField>,
    pub config: &'a SiegeConfig,
}

/// Output from a policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetUpdate {
    pub target: Option<TargetRef>,
    pub destination: Option<DVec2>,
    pub changed: bool,
}

/// A targeting policy. Selected once per unit at spawn.
pub type PolicyFn = fn(&TargetContext) -> TargetUpdate;

/// Policy table: which function drives each archetype.
pub fn policy_for(archetype: Archetype) -> PolicyFn {
    match archetype {
        Archetype::Melee | Archetype::WallBreaker => policies::melee,
        Archetype::Ranged => policies::ranged,
        Archetype::Siege => policies::siege,
    }
}

/// Evaluate the archetype's policy for one unit.
pub fn evaluate(ctx: &TargetContext) -> TargetUpdate {
    evaluate_with(policy_for(ctx.archetype), ctx)
}

/// Evaluate a pre-selected policy. Retreating units and units still held
/// by the gap latch are left untouched.
pub fn evaluate_with(policy: PolicyFn, ctx: &TargetContext) -> TargetUpdate {
    if ctx.state.is_retreating || ctx.state.gap_blocked {
        return hold(ctx);
    }
    policy(ctx)
}

/// Apply an update to the unit's state.
pub fn apply(state: &mut TargetAcquisitionState, update: &TargetUpdate) {
    state.current_target = update.target;
    state.destination = update.destination;
}

impl TargetContext<'_> {
    pub(crate) fn fortress_center(&self) -> DVec2 {
        self.config.fortress_center
    }

    /// The current wall target if it still blocks.
    pub(crate) fn live_wall_target(&self) -> Option<&WallSegment> {
        let id = self.state.current_target?.wall()?;
        self.walls?.get(id).filter(|w| w.blocks())
    }

    pub(crate) fn distance_to_center(&self) -> f64 {
        self.position.distance(self.fortress_center())
    }

    /// Whether the unit stands in `breach` or has already passed it.
    pub(crate) fn has_entered(&self, breach: &WallSegment) -> bool {
        let dist = self.distance_to_center();
        dist < self.config.interior_radius
            || dist < breach.center.distance(self.fortress_center())
            || self.position.distance(breach.center) <= self.config.breach_entry_radius
    }
}

/// Keep the current target and destination.
pub(crate) fn hold(ctx: &TargetContext) -> TargetUpdate {
    TargetUpdate {
        target: ctx.state.current_target,
        destination: ctx.state.destination,
        changed: false,
    }
}

pub(crate) fn retarget(ctx: &TargetContext, target: Option<TargetRef>, destination: DVec2) -> TargetUpdate {
    let destination = Some(destination);
    TargetUpdate {
        target,
        destination,
        changed: target != ctx.state.current_target || destination != ctx.state.destination,
    }
}

/// Drop any target and walk to the fortress center.
pub(crate) fn head_to_center(ctx: &TargetContext) -> TargetUpdate {
    retarget(ctx, None, ctx.fortress_center())
}

/// Attack a wall from its outward face.
pub(crate) fn engage_wall(ctx: &TargetContext, wall: &WallSegment) -> TargetUpdate {
    retarget(
        ctx,
        Some(TargetRef::Wall(wall.id)),
        wall.outward_face(ctx.config.wall_face_offset),
    )
}

/// Chase a mobile entity.
pub(crate) fn engage_mobile(ctx: &TargetContext, mobile: &MobileEntity) -> TargetUpdate {
    retarget(ctx, Some(TargetRef::Mobile(mobile.id)), mobile.position)
}
