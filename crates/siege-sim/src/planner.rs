//! Path planner seam.
//!
//! The engine never computes routes itself. It hands each unit's single
//! destination to a `PathPlanner` and asks it for the next step. Hosts with
//! a navmesh plug their own implementation in; `DirectPlanner` walks in a
//! straight line and is what the headless engine and tests use.

use std::collections::HashMap;

use glam::DVec2;

use siege_core::constants::PLANNER_STOPPING_DISTANCE;
use siege_core::types::UnitId;

/// External navigation service.
pub trait PathPlanner {
    /// Replace the agent's destination. Re-sending the same point is a no-op.
    fn set_destination(&mut self, agent: UnitId, point: DVec2);

    /// Whether the agent's route is still being computed.
    fn is_path_pending(&self, agent: UnitId) -> bool;

    /// Whether the agent has reached its destination.
    fn has_arrived(&self, agent: UnitId, position: DVec2) -> bool;

    /// Next position for an agent at `position` that may move at most
    /// `max_step` this frame.
    fn steer(&mut self, agent: UnitId, position: DVec2, max_step: f64) -> DVec2;

    /// Drop all state for a despawned agent.
    fn forget(&mut self, agent: UnitId);
}

#[derive(Debug, Clone, Copy)]
struct Route {
    destination: DVec2,
    pending_ticks: u32,
}

/// Straight-line planner with an optional route computation delay.
#[derive(Debug, Clone)]
pub struct DirectPlanner {
    routes: HashMap<UnitId, Route>,
    pending_delay_ticks: u32,
    stopping_distance: f64,
}

impl Default for DirectPlanner {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
            pending_delay_ticks: 0,
            stopping_distance: PLANNER_STOPPING_DISTANCE,
        }
    }
}

impl DirectPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes take `ticks` calls to `steer` before the agent starts moving.
    pub fn with_pending_delay(ticks: u32) -> Self {
        Self {
            pending_delay_ticks: ticks,
            ..Self::default()
        }
    }

    /// Current destination of an agent, if any.
    pub fn destination(&self, agent: UnitId) -> Option<DVec2> {
        self.routes.get(&agent).map(|r| r.destination)
    }
}

impl PathPlanner for DirectPlanner {
    fn set_destination(&mut self, agent: UnitId, point: DVec2) {
        if self.destination(agent) == Some(point) {
            return;
        }
        self.routes.insert(
            agent,
            Route {
                destination: point,
                pending_ticks: self.pending_delay_ticks,
            },
        );
    }

    fn is_path_pending(&self, agent: UnitId) -> bool {
        self.routes.get(&agent).is_some_and(|r| r.pending_ticks > 0)
    }

    fn has_arrived(&self, agent: UnitId, position: DVec2) -> bool {
        self.routes.get(&agent).is_some_and(|r| {
            r.pending_ticks == 0 && r.destination.distance(position) <= self.stopping_distance
        })
    }

    fn steer(&mut self, agent: UnitId, position: DVec2, max_step: f64) -> DVec2 {
        let Some(route) = self.routes.get_mut(&agent) else {
            return position;
        };
        if route.pending_ticks > 0 {
            route.pending_ticks -= 1;
            return position;
        }
        let to_go = route.destination - position;
        let dist = to_go.length();
        if dist <= max_step.max(0.0) {
            route.destination
        } else {
            position + to_go / dist * max_step.max(0.0)
        }
    }

    fn forget(&mut self, agent: UnitId) {
        self.routes.remove(&agent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGENT: UnitId = UnitId(1);

    #[test]
    fn test_steer_moves_at_most_max_step() {
        let mut planner = DirectPlanner::new();
        planner.set_destination(AGENT, DVec2::new(10.0, 0.0));
        let next = planner.steer(AGENT, DVec2::ZERO, 2.0);
        assert!((next - DVec2::new(2.0, 0.0)).length() < 1e-12);
        let last = planner.steer(AGENT, DVec2::new(9.5, 0.0), 2.0);
        assert_eq!(last, DVec2::new(10.0, 0.0));
        assert!(planner.has_arrived(AGENT, last));
    }

    #[test]
    fn test_pending_delay_holds_agent() {
        let mut planner = DirectPlanner::with_pending_delay(2);
        planner.set_destination(AGENT, DVec2::new(1.0, 0.0));
        assert!(planner.is_path_pending(AGENT));
        assert_eq!(planner.steer(AGENT, DVec2::ZERO, 5.0), DVec2::ZERO);
        assert_eq!(planner.steer(AGENT, DVec2::ZERO, 5.0), DVec2::ZERO);
        assert!(!planner.is_path_pending(AGENT));
        assert_eq!(planner.steer(AGENT, DVec2::ZERO, 5.0), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_same_destination_does_not_restart_route() {
        let mut planner = DirectPlanner::with_pending_delay(1);
        planner.set_destination(AGENT, DVec2::new(1.0, 0.0));
        planner.steer(AGENT, DVec2::ZERO, 1.0);
        planner.set_destination(AGENT, DVec2::new(1.0, 0.0));
        assert!(!planner.is_path_pending(AGENT));
    }

    #[test]
    fn test_unknown_agent_stays_put() {
        let mut planner = DirectPlanner::new();
        let pos = DVec2::new(3.0, 4.0);
        assert_eq!(planner.steer(AGENT, pos, 1.0), pos);
        assert!(!planner.has_arrived(AGENT, pos));
        planner.set_destination(AGENT, DVec2::ZERO);
        planner.forget(AGENT);
        assert_eq!(planner.destination(AGENT), None);
    }
}
