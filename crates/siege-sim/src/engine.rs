//! Siege engine.
//!
//! `SiegeEngine` owns the hecs world of hostile units and mobile entities,
//! the wall registry, the cost field and the path planner. It processes
//! host commands, runs the per-frame systems and produces `SiegeSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use siege_ai::cost_field::CostField;
use siege_core::commands::SiegeCommand;
use siege_core::components::{GroundPosition, Hostile, MobileEntity, TargetAcquisitionState};
use siege_core::config::SiegeConfig;
use siege_core::enums::{EnemyKind, MobileKind, TimeOfDay};
use siege_core::error::WallError;
use siege_core::events::SiegeEvent;
use siege_core::state::SiegeSnapshot;
use siege_core::types::{MobileId, SimTime, UnitId, WallId};
use siege_core::walls::{TopologyObserver, WallRegistry};

use crate::error::EngineError;
use crate::planner::{DirectPlanner, PathPlanner};
use crate::systems;
use crate::systems::retarget::RetargetInputs;
use crate::topology::TopologyHooks;
use crate::world_setup::{self, mobile_id, unit_id};

/// Configuration for starting a new engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub siege: SiegeConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            siege: SiegeConfig::default(),
        }
    }
}

/// The engine. Owns the ECS world and all siege state.
pub struct SiegeEngine {
    world: World,
    walls: WallRegistry,
    cost_field: CostField,
    planner: Box<dyn PathPlanner>,
    config: SiegeConfig,
    time: SimTime,
    time_of_day: TimeOfDay,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SiegeCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SiegeEvent>,
}

impl SiegeEngine {
    /// Create an engine that walks units in straight lines.
    pub fn new(config: SimConfig) -> Result<Self, EngineError> {
        Self::with_planner(config, Box::new(DirectPlanner::new()))
    }

    /// Create an engine driving the given path planner.
    pub fn with_planner(config: SimConfig, planner: Box<dyn PathPlanner>) -> Result<Self, EngineError> {
        config.siege.validate()?;
        Ok(Self {
            world: World::new(),
            walls: WallRegistry::new(),
            cost_field: CostField::from_config(&config.siege),
            planner,
            config: config.siege,
            time: SimTime::default(),
            time_of_day: TimeOfDay::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SiegeCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SiegeCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one frame and return the resulting snapshot.
    pub fn tick(&mut self) -> SiegeSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.walls,
            &self.cost_field,
            &self.time,
            self.time_of_day,
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    pub fn config(&self) -> &SiegeConfig {
        &self.config
    }

    pub fn walls(&self) -> &WallRegistry {
        &self.walls
    }

    pub fn cost_field(&self) -> &CostField {
        &self.cost_field
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // ---- Walls ----

    /// Build the default closed ring around the fortress center.
    pub fn build_fortress(&mut self) -> Result<Vec<WallId>, EngineError> {
        let center = self.config.fortress_center;
        let ids = self.mutate_walls(|walls, hooks| world_setup::build_fortress(walls, center, hooks))?;
        info!(walls = ids.len(), max_cost = self.cost_field.max_cost(), "fortress built");
        Ok(ids)
    }

    /// Start construction of a segment. It blocks once completed.
    pub fn build_wall(
        &mut self,
        center: DVec2,
        orientation: DVec2,
        half_span: f64,
        max_hp: f64,
    ) -> Result<WallId, EngineError> {
        self.mutate_walls(|walls, hooks| walls.build(center, orientation, half_span, max_hp, hooks))
    }

    pub fn complete_wall(&mut self, wall: WallId) -> Result<(), EngineError> {
        self.mutate_walls(|walls, hooks| walls.complete_construction(wall, hooks))
    }

    /// Apply combat damage. Returns `true` if the segment was destroyed.
    pub fn damage_wall(&mut self, wall: WallId, amount: f64) -> Result<bool, EngineError> {
        self.mutate_walls(|walls, hooks| walls.record_damage(wall, amount, hooks))
    }

    pub fn destroy_wall(&mut self, wall: WallId) -> Result<(), EngineError> {
        self.mutate_walls(|walls, hooks| walls.destroy(wall, hooks))
    }

    pub fn repair_wall(&mut self, wall: WallId) -> Result<(), EngineError> {
        self.mutate_walls(|walls, hooks| walls.repair(wall, hooks))
    }

    // ---- Units ----

    /// Spawn a hostile unit and run its initial target acquisition.
    pub fn spawn_hostile(&mut self, kind: EnemyKind, position: DVec2) -> UnitId {
        let entity = world_setup::spawn_hostile(
            &mut self.world,
            &mut self.rng,
            kind,
            position,
            self.config.retarget_interval_secs,
        );
        let inputs = RetargetInputs {
            walls: &self.walls,
            cost_field: &self.cost_field,
            config: &self.config,
        };
        systems::retarget::acquire(
            &mut self.world,
            entity,
            &inputs,
            &mut *self.planner,
            &mut self.events,
        );
        unit_id(entity)
    }

    /// Number of hostile units alive.
    pub fn unit_count(&self) -> usize {
        self.world.query::<&Hostile>().iter().count()
    }

    pub fn unit_state(&self, unit: UnitId) -> Result<TargetAcquisitionState, EngineError> {
        let entity = self.unit_entity(unit)?;
        self.world
            .get::<&TargetAcquisitionState>(entity)
            .map(|state| (*state).clone())
            .map_err(|_| EngineError::UnknownUnit(unit))
    }

    pub fn unit_position(&self, unit: UnitId) -> Result<DVec2, EngineError> {
        let entity = self.unit_entity(unit)?;
        self.world
            .get::<&GroundPosition>(entity)
            .map(|pos| pos.0)
            .map_err(|_| EngineError::UnknownUnit(unit))
    }

    // ---- Mobile entities ----

    pub fn spawn_mobile(&mut self, kind: MobileKind, position: DVec2) -> MobileId {
        mobile_id(world_setup::spawn_mobile(&mut self.world, kind, position))
    }

    /// Mark a mobile entity dead. It is removed at the end of the next frame.
    pub fn kill_mobile(&mut self, mobile: MobileId) -> Result<(), EngineError> {
        self.with_mobile(mobile, |m| m.is_dead = true)
    }

    /// Move a mobile entity. Its owner drives it; the engine only reads it.
    pub fn move_mobile(&mut self, mobile: MobileId, position: DVec2) -> Result<(), EngineError> {
        self.with_mobile(mobile, |m| m.position = position)
    }

    // ---- Day cycle ----

    /// Night begins. Unless night assaults are enabled, every active hostile
    /// retreats to the western edge. Returns how many units turned back.
    pub fn nightfall(&mut self) -> u32 {
        self.time_of_day = TimeOfDay::Night;
        let retreating = if siege_ai::retreat::nightfall_orders_retreat(&self.config) {
            systems::retreat::order_retreat(&mut self.world, &mut *self.planner, &self.config)
        } else {
            0
        };
        info!(retreating, night_assault = self.config.night_assault, "nightfall");
        self.events.push(SiegeEvent::Nightfall { retreating });
        retreating
    }

    pub fn daybreak(&mut self) {
        info!("daybreak");
        self.time_of_day = TimeOfDay::Day;
    }

    /// Run a registry mutation with the cost field and event log attached
    /// as its observer.
    fn mutate_walls<T>(
        &mut self,
        f: impl FnOnce(&mut WallRegistry, &mut dyn TopologyObserver) -> Result<T, WallError>,
    ) -> Result<T, EngineError> {
        let mut hooks = TopologyHooks {
            cost_field: &mut self.cost_field,
            events: &mut self.events,
        };
        Ok(f(&mut self.walls, &mut hooks)?)
    }

    fn unit_entity(&self, unit: UnitId) -> Result<Entity, EngineError> {
        Entity::from_bits(unit.0)
            .filter(|entity| self.world.get::<&Hostile>(*entity).is_ok())
            .ok_or(EngineError::UnknownUnit(unit))
    }

    fn with_mobile(
        &mut self,
        mobile: MobileId,
        f: impl FnOnce(&mut MobileEntity),
    ) -> Result<(), EngineError> {
        let entity = Entity::from_bits(mobile.0).ok_or(EngineError::UnknownMobile(mobile))?;
        let mut entry = self
            .world
            .get::<&mut MobileEntity>(entity)
            .map_err(|_| EngineError::UnknownMobile(mobile))?;
        f(&mut *entry);
        Ok(())
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                warn!(%err, "command rejected");
            }
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: SiegeCommand) -> Result<(), EngineError> {
        match command {
            SiegeCommand::BuildWall {
                center,
                orientation,
                half_span,
                max_hp,
            } => {
                self.build_wall(center, orientation, half_span, max_hp)?;
            }
            SiegeCommand::CompleteWall { wall } => self.complete_wall(wall)?,
            SiegeCommand::DamageWall { wall, amount } => {
                self.damage_wall(wall, amount)?;
            }
            SiegeCommand::DestroyWall { wall } => self.destroy_wall(wall)?,
            SiegeCommand::RepairWall { wall } => self.repair_wall(wall)?,
            SiegeCommand::SpawnHostile { kind, position } => {
                self.spawn_hostile(kind, position);
            }
            SiegeCommand::SpawnMobile { kind, position } => {
                self.spawn_mobile(kind, position);
            }
            SiegeCommand::KillMobile { mobile } => self.kill_mobile(mobile)?,
            SiegeCommand::Nightfall => {
                self.nightfall();
            }
            SiegeCommand::Daybreak => self.daybreak(),
        }
        Ok(())
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();

        // 1. Retreat arrivals
        systems::retreat::run(
            &self.world,
            &*self.planner,
            &self.config,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 2. Gap guard (every frame)
        let latched = systems::gap_guard::run(
            &mut self.world,
            &self.walls,
            &self.config,
            &mut *self.planner,
            &mut self.events,
        );
        // 3. Scheduled retarget ticks
        let inputs = RetargetInputs {
            walls: &self.walls,
            cost_field: &self.cost_field,
            config: &self.config,
        };
        systems::retarget::run(
            &mut self.world,
            &inputs,
            &latched,
            &mut *self.planner,
            &mut self.events,
            dt,
        );
        // 4. Movement along planner routes
        systems::movement::run(&mut self.world, &mut *self.planner, dt);
        // 5. Cleanup (arrived hostiles, dead mobiles)
        systems::cleanup::run(&mut self.world, &mut *self.planner, &mut self.despawn_buffer);
    }
}
