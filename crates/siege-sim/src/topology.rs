//! Wall topology observer used by the engine.
//!
//! Rebuilds the cost field inside the mutation call and records the
//! matching host events.

use tracing::info;

use siege_ai::cost_field::CostField;
use siege_core::events::SiegeEvent;
use siege_core::walls::{TopologyChange, TopologyObserver, WallRegistry};

pub struct TopologyHooks<'a> {
    pub cost_field: &'a mut CostField,
    pub events: &'a mut Vec<SiegeEvent>,
}

impl TopologyObserver for TopologyHooks<'_> {
    fn on_topology_changed(&mut self, registry: &WallRegistry, change: TopologyChange) {
        self.cost_field.on_topology_changed(registry, change);

        match change {
            TopologyChange::Built(_) => {}
            TopologyChange::Completed(wall) => {
                self.events.push(SiegeEvent::WallCompleted { wall });
            }
            TopologyChange::Destroyed(wall) => {
                info!(?wall, "breach opened");
                self.events.push(SiegeEvent::BreachOpened { wall });
            }
            TopologyChange::Repaired(wall) => {
                info!(?wall, "wall repaired");
                self.events.push(SiegeEvent::WallRepaired { wall });
            }
        }
        self.events.push(SiegeEvent::CostFieldRebuilt {
            max_cost: self.cost_field.max_cost(),
        });
    }
}
