//! Snapshot system: read-only view of the world for the host.

use hecs::World;

use siege_ai::cost_field::CostField;
use siege_core::components::{GroundPosition, Hostile, TargetAcquisitionState};
use siege_core::enums::TimeOfDay;
use siege_core::events::SiegeEvent;
use siege_core::state::{SiegeSnapshot, UnitView};
use siege_core::types::SimTime;
use siege_core::walls::WallRegistry;

use crate::world_setup::unit_id;

pub fn build_snapshot(
    world: &World,
    walls: &WallRegistry,
    cost_field: &CostField,
    time: &SimTime,
    time_of_day: TimeOfDay,
    events: Vec<SiegeEvent>,
) -> SiegeSnapshot {
    SiegeSnapshot {
        time: *time,
        time_of_day,
        units: build_units(world),
        walls: walls.all_walls().to_vec(),
        max_ray_cost: cost_field.max_cost(),
        events,
    }
}

fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&Hostile, &GroundPosition, &TargetAcquisitionState)>()
        .iter()
        .map(|(entity, (hostile, pos, state))| UnitView {
            unit: unit_id(entity),
            kind: hostile.kind,
            position: pos.0,
            target: state.current_target,
            destination: state.destination,
            is_retreating: state.is_retreating,
            gap_blocked: state.gap_blocked,
        })
        .collect();
    units.sort_by_key(|u| u.unit.0);
    units
}
