//! Retreat controller: nightfall pulls every hostile back to the western edge.
//!
//! Retreat is terminal. Once set, policies and the gap guard leave the unit
//! alone until the host despawns it on arrival.

use glam::DVec2;

use siege_core::components::TargetAcquisitionState;
use siege_core::config::SiegeConfig;

/// Whether nightfall should send hostiles home under this config.
pub fn nightfall_orders_retreat(config: &SiegeConfig) -> bool {
    !config.night_assault
}

/// Point on the western edge at the unit's current depth.
pub fn retreat_point(position: DVec2, config: &SiegeConfig) -> DVec2 {
    DVec2::new(config.west_edge_x, position.y)
}

/// Switch a unit into retreat. Returns the destination for the planner,
/// or `None` if it was already retreating.
pub fn begin_retreat(
    state: &mut TargetAcquisitionState,
    position: DVec2,
    config: &SiegeConfig,
) -> Option<DVec2> {
    if state.is_retreating {
        return None;
    }
    let destination = retreat_point(position, config);
    state.is_retreating = true;
    state.gap_blocked = false;
    state.current_target = None;
    state.destination = Some(destination);
    Some(destination)
}

/// A retreating unit has arrived once it is at the western edge and the
/// planner has nothing left to compute.
pub fn has_arrived(position: DVec2, path_pending: bool, config: &SiegeConfig) -> bool {
    position.x <= config.west_edge_x + config.retreat_arrival_tolerance && !path_pending
}
