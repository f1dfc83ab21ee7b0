//! Movement system: steps each hostile along its planner route.

use hecs::World;

use siege_core::components::GroundPosition;

use crate::planner::PathPlanner;
use crate::world_setup::{unit_id, Brain};

pub fn run(world: &mut World, planner: &mut dyn PathPlanner, dt: f64) {
    for (entity, (brain, pos)) in world.query_mut::<(&Brain, &mut GroundPosition)>() {
        pos.0 = planner.steer(unit_id(entity), pos.0, brain.move_speed * dt);
    }
}
