//! Retreat system: issues nightfall orders and detects arrivals.

use hecs::{Entity, World};
use tracing::debug;

use siege_ai::retreat::{begin_retreat, has_arrived};
use siege_core::components::{GroundPosition, Hostile, TargetAcquisitionState};
use siege_core::config::SiegeConfig;
use siege_core::events::SiegeEvent;

use crate::planner::PathPlanner;
use crate::world_setup::unit_id;

/// Send every active hostile to the western edge. Returns how many units
/// switched into retreat.
pub fn order_retreat(world: &mut World, planner: &mut dyn PathPlanner, config: &SiegeConfig) -> u32 {
    let mut retreating = 0;
    for (entity, (_hostile, pos, state)) in
        world.query_mut::<(&Hostile, &GroundPosition, &mut TargetAcquisitionState)>()
    {
        if let Some(destination) = begin_retreat(state, pos.0, config) {
            planner.set_destination(unit_id(entity), destination);
            retreating += 1;
        }
    }
    retreating
}

/// Queue retreating units that reached the edge for despawn.
pub fn run(
    world: &World,
    planner: &dyn PathPlanner,
    config: &SiegeConfig,
    events: &mut Vec<SiegeEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut query = world.query::<(&Hostile, &GroundPosition, &TargetAcquisitionState)>();
    for (entity, (_hostile, pos, state)) in query.iter() {
        if !state.is_retreating {
            continue;
        }
        let unit = unit_id(entity);
        if has_arrived(pos.0, planner.is_path_pending(unit), config) {
            debug!(?unit, "retreat complete");
            events.push(SiegeEvent::RetreatArrived { unit });
            despawn_buffer.push(entity);
        }
    }
}
