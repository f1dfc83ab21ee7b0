//! Cleanup system: removes arrived hostiles and dead mobile entities.

use hecs::{Entity, World};

use siege_core::components::MobileEntity;

use crate::planner::PathPlanner;
use crate::world_setup::unit_id;

/// Despawn everything queued this frame plus every dead mobile entity.
pub fn run(world: &mut World, planner: &mut dyn PathPlanner, despawn_buffer: &mut Vec<Entity>) {
    for (entity, mobile) in world.query_mut::<&MobileEntity>() {
        if mobile.is_dead {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        planner.forget(unit_id(entity));
        let _ = world.despawn(entity);
    }
}
