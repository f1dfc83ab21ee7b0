//! Gap guard system: runs every frame, ahead of the retarget pass.

use hecs::{Entity, World};
use tracing::debug;

use siege_ai::gap_guard::{self, GapContext};
use siege_core::components::{GroundPosition, Hostile, TargetAcquisitionState};
use siege_core::config::SiegeConfig;
use siege_core::events::SiegeEvent;
use siege_core::walls::WallRegistry;

use crate::planner::PathPlanner;
use crate::world_setup::unit_id;

/// Returns the units latched this frame.
pub fn run(
    world: &mut World,
    walls: &WallRegistry,
    config: &SiegeConfig,
    planner: &mut dyn PathPlanner,
    events: &mut Vec<SiegeEvent>,
) -> Vec<Entity> {
    let mut latched = Vec::new();
    for (entity, (_hostile, pos, state)) in
        world.query_mut::<(&Hostile, &GroundPosition, &mut TargetAcquisitionState)>()
    {
        let ctx = GapContext {
            position: pos.0,
            state: &*state,
            walls: Some(walls),
            config,
        };
        let Some(ov) = gap_guard::check(&ctx) else {
            continue;
        };

        let unit = unit_id(entity);
        gap_guard::apply(state, &ov);
        planner.set_destination(unit, ov.destination);
        debug!(?unit, wall = ?ov.wall, "gap guard redirect");
        events.push(SiegeEvent::GapBlocked { unit, wall: ov.wall });
        latched.push(entity);
    }
    latched
}
