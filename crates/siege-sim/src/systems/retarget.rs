//! Retarget system: scheduled per-unit target acquisition.
//!
//! Each unit carries its own countdown. When it expires the gap latch is
//! released and the unit's policy runs once. A latch set earlier in the
//! same frame survives until the following tick. Changed destinations go
//! straight to the path planner.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::debug;

use siege_ai::cost_field::CostField;
use siege_ai::fsm::{apply, evaluate_with, TargetContext};
use siege_ai::gap_guard;
use siege_core::components::{GroundPosition, Hostile, MobileSnapshot, TargetAcquisitionState};
use siege_core::config::SiegeConfig;
use siege_core::events::SiegeEvent;
use siege_core::walls::WallRegistry;

use crate::planner::PathPlanner;
use crate::world_setup::{unit_id, Brain, MobileLists};

/// Shared read-only inputs for a retarget pass.
pub struct RetargetInputs<'a> {
    pub walls: &'a WallRegistry,
    pub cost_field: &'a CostField,
    pub config: &'a SiegeConfig,
}

/// Advance every unit's retarget timer by `dt` and run the units that are due.
/// `latched` lists the units the gap guard redirected this frame.
pub fn run(
    world: &mut World,
    inputs: &RetargetInputs,
    latched: &[Entity],
    planner: &mut dyn PathPlanner,
    events: &mut Vec<SiegeEvent>,
    dt: f64,
) {
    let mobiles = MobileLists::collect(world);
    let snapshot = mobiles.snapshot();

    for (entity, (hostile, brain, pos, state)) in world.query_mut::<(
        &Hostile,
        &Brain,
        &GroundPosition,
        &mut TargetAcquisitionState,
    )>() {
        if state.is_retreating {
            continue;
        }
        state.retarget_timer -= dt;
        if state.retarget_timer > 0.0 {
            continue;
        }
        state.retarget_timer += inputs.config.retarget_interval_secs;
        if latched.contains(&entity) {
            continue;
        }
        gap_guard::release(state);
        retarget_unit(entity, hostile, brain, pos.0, state, inputs, snapshot, planner, events);
    }
}

/// Initial acquisition for a freshly spawned unit, outside its schedule.
pub fn acquire(
    world: &mut World,
    entity: Entity,
    inputs: &RetargetInputs,
    planner: &mut dyn PathPlanner,
    events: &mut Vec<SiegeEvent>,
) {
    let mobiles = MobileLists::collect(world);
    let Ok((hostile, brain, pos, state)) = world.query_one_mut::<(
        &Hostile,
        &Brain,
        &GroundPosition,
        &mut TargetAcquisitionState,
    )>(entity) else {
        return;
    };
    retarget_unit(entity, hostile, brain, pos.0, state, inputs, mobiles.snapshot(), planner, events);
}

#[allow(clippy::too_many_arguments)]
fn retarget_unit(
    entity: Entity,
    hostile: &Hostile,
    brain: &Brain,
    position: DVec2,
    state: &mut TargetAcquisitionState,
    inputs: &RetargetInputs,
    mobiles: MobileSnapshot,
    planner: &mut dyn PathPlanner,
    events: &mut Vec<SiegeEvent>,
) {
    let ctx = TargetContext {
        archetype: hostile.archetype,
        position,
        state: &*state,
        walls: Some(inputs.walls),
        mobiles,
        cost_field: Some(inputs.cost_field),
        config: inputs.config,
    };
    let update = evaluate_with(brain.policy, &ctx);
    if !update.changed {
        return;
    }

    let unit = unit_id(entity);
    let previous = state.current_target;
    apply(state, &update);

    if let Some(destination) = update.destination {
        planner.set_destination(unit, destination);
    }
    if update.target != previous {
        debug!(?unit, kind = ?hostile.kind, target = ?update.target, "retargeted");
        events.push(SiegeEvent::TargetChanged {
            unit,
            target: update.target,
        });
    }
}
