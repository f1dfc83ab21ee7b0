//! Tests for the engine: frame ordering, wall mutations, retreat and
//! determinism.

use glam::DVec2;

use siege_core::commands::SiegeCommand;
use siege_core::components::MobileEntity;
use siege_core::config::SiegeConfig;
use siege_core::constants::DT;
use siege_core::enums::*;
use siege_core::events::SiegeEvent;
use siege_core::types::{TargetRef, UnitId, WallId};

use crate::engine::{SiegeEngine, SimConfig};
use crate::error::EngineError;
use crate::planner::DirectPlanner;

/// Enough frames for every unit to reach at least one scheduled retarget.
const RETARGET_FRAMES: usize = 35;

fn engine(seed: u64) -> SiegeEngine {
    SiegeEngine::new(SimConfig {
        seed,
        ..Default::default()
    })
    .unwrap()
}

fn engine_with_fortress(seed: u64) -> (SiegeEngine, Vec<WallId>) {
    let mut engine = engine(seed);
    let walls = engine.build_fortress().unwrap();
    (engine, walls)
}

/// Tick `frames` times and return every event emitted along the way.
fn run(engine: &mut SiegeEngine, frames: usize) -> Vec<SiegeEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(engine.tick().events);
    }
    events
}

fn target_changes(events: &[SiegeEvent], unit: UnitId) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SiegeEvent::TargetChanged { unit: u, .. } if *u == unit))
        .count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let setup = |engine: &mut SiegeEngine| {
        engine.build_fortress().unwrap();
        engine.queue_commands([
            SiegeCommand::SpawnMobile {
                kind: MobileKind::Worker,
                position: DVec2::new(0.0, -5.0),
            },
            SiegeCommand::SpawnHostile {
                kind: EnemyKind::Orc,
                position: DVec2::new(30.0, 4.0),
            },
            SiegeCommand::SpawnHostile {
                kind: EnemyKind::BowOrc,
                position: DVec2::new(-20.0, 25.0),
            },
            SiegeCommand::SpawnHostile {
                kind: EnemyKind::GoblinCannoneer,
                position: DVec2::new(10.0, -30.0),
            },
            SiegeCommand::SpawnHostile {
                kind: EnemyKind::Troll,
                position: DVec2::new(-28.0, -9.0),
            },
        ]);
    };

    let mut engine_a = engine(12345);
    let mut engine_b = engine(12345);
    setup(&mut engine_a);
    setup(&mut engine_b);

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_retarget_phase_depends_on_seed() {
    let timers = |seed: u64| -> Vec<f64> {
        let mut engine = engine(seed);
        (0..5)
            .map(|i| engine.spawn_hostile(EnemyKind::Orc, DVec2::new(30.0, i as f64)))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|unit| engine.unit_state(unit).unwrap().retarget_timer)
            .collect()
    };
    let a = timers(111);
    assert_eq!(a, timers(111));
    assert_ne!(a, timers(222), "Different seeds should stagger differently");
    assert!(a.iter().all(|t| (0.0..1.0).contains(t)));
}

// ---- Walls ----

#[test]
fn test_default_fortress_is_closed() {
    let (mut engine, walls) = engine_with_fortress(1);
    assert_eq!(walls.len(), 25);
    let snap = engine.tick();
    assert_eq!(snap.max_ray_cost, 1);
    assert_eq!(snap.walls.len(), 25);
    assert!((0..360).all(|i| engine.cost_field().cost_at(i) == 1));
}

#[test]
fn test_wall_construction_updates_cost_field() {
    let mut engine = engine(1);
    let wall = engine
        .build_wall(DVec2::new(30.0, 0.0), DVec2::X, 1.5, 100.0)
        .unwrap();
    let snap = engine.tick();
    assert_eq!(snap.max_ray_cost, 0, "unfinished walls do not block");
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SiegeEvent::WallCompleted { .. })));

    engine.complete_wall(wall).unwrap();
    let snap = engine.tick();
    assert_eq!(snap.max_ray_cost, 1);
    assert!(snap.events.contains(&SiegeEvent::WallCompleted { wall }));
    assert!(snap.events.contains(&SiegeEvent::CostFieldRebuilt { max_cost: 1 }));
}

#[test]
fn test_damage_opens_breach() {
    let (mut engine, walls) = engine_with_fortress(1);
    engine.tick();
    assert!(!engine.damage_wall(walls[3], 60.0).unwrap());
    assert!(engine.damage_wall(walls[3], 60.0).unwrap());
    let snap = engine.tick();
    assert!(snap.events.contains(&SiegeEvent::BreachOpened { wall: walls[3] }));
    assert!(engine.cost_field().cost_at(43) == 0, "ray through the breach is clear");

    engine.repair_wall(walls[3]).unwrap();
    let snap = engine.tick();
    assert!(snap.events.contains(&SiegeEvent::WallRepaired { wall: walls[3] }));
    assert_eq!(engine.cost_field().cost_at(43), 1);
}

#[test]
fn test_rejected_command_is_skipped() {
    let (mut engine, _) = engine_with_fortress(1);
    engine.tick();
    engine.queue_commands([
        SiegeCommand::DestroyWall { wall: WallId(999) },
        SiegeCommand::SpawnHostile {
            kind: EnemyKind::Orc,
            position: DVec2::new(30.0, 0.0),
        },
    ]);
    let snap = engine.tick();
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SiegeEvent::BreachOpened { .. })));
    assert_eq!(snap.units.len(), 1, "later commands still run");
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimConfig {
        siege: SiegeConfig {
            melee_divert_radius: 20.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(SiegeEngine::new(config), Err(EngineError::Config(_))));
}

// ---- Target acquisition ----

#[test]
fn test_melee_rushes_breach() {
    let (mut engine, walls) = engine_with_fortress(7);
    let orc = engine.spawn_hostile(EnemyKind::Orc, DVec2::new(30.0, 0.0));
    let state = engine.unit_state(orc).unwrap();
    assert_eq!(state.current_target, Some(TargetRef::Wall(walls[0])));

    engine.destroy_wall(walls[6]).unwrap();
    run(&mut engine, RETARGET_FRAMES);

    let state = engine.unit_state(orc).unwrap();
    let breach = engine.walls().get(walls[6]).unwrap().center;
    assert_eq!(state.current_target, None);
    assert_eq!(state.destination, Some(breach));
}

#[test]
fn test_melee_passes_through_breach_to_center() {
    let (mut engine, walls) = engine_with_fortress(11);
    engine.destroy_wall(walls[0]).unwrap();
    let orc = engine.spawn_hostile(EnemyKind::Orc, DVec2::new(30.0, 0.0));

    run(&mut engine, 600);

    let position = engine.unit_position(orc).unwrap();
    assert!(
        position.length() < engine.config().interior_radius,
        "orc stuck at {position}"
    );
    let state = engine.unit_state(orc).unwrap();
    assert_eq!(state.current_target, None);
    assert_eq!(state.destination, Some(DVec2::ZERO));
}

#[test]
fn test_ranged_switches_to_mobile_once_sight_clears() {
    let (mut engine, walls) = engine_with_fortress(7);
    let worker = engine.spawn_mobile(MobileKind::Worker, DVec2::new(5.0, 0.0));
    let archer = engine.spawn_hostile(EnemyKind::BowOrc, DVec2::new(20.0, 0.0));
    assert_eq!(
        engine.unit_state(archer).unwrap().current_target,
        Some(TargetRef::Wall(walls[0]))
    );

    engine.destroy_wall(walls[0]).unwrap();
    let events = run(&mut engine, RETARGET_FRAMES);

    assert_eq!(
        engine.unit_state(archer).unwrap().current_target,
        Some(TargetRef::Mobile(worker))
    );
    assert!(events.contains(&SiegeEvent::TargetChanged {
        unit: archer,
        target: Some(TargetRef::Mobile(worker)),
    }));
}

#[test]
fn test_killed_mobile_is_dropped() {
    let mut engine = engine(3);
    let worker = engine.spawn_mobile(MobileKind::Worker, DVec2::new(26.0, 0.0));
    let orc = engine.spawn_hostile(EnemyKind::Orc, DVec2::new(30.0, 0.0));
    assert_eq!(
        engine.unit_state(orc).unwrap().current_target,
        Some(TargetRef::Mobile(worker))
    );

    engine.kill_mobile(worker).unwrap();
    run(&mut engine, RETARGET_FRAMES);

    let state = engine.unit_state(orc).unwrap();
    assert_eq!(state.current_target, None);
    assert_eq!(state.destination, Some(DVec2::ZERO));
    assert_eq!(engine.world().query::<&MobileEntity>().iter().count(), 0);
    assert!(matches!(
        engine.kill_mobile(worker),
        Err(EngineError::UnknownMobile(_))
    ));
}

// ---- Gap guard ----

#[test]
fn test_gap_guard_latches_until_next_retarget() {
    let (mut engine, walls) = engine_with_fortress(9);
    engine.damage_wall(walls[10], 50.0).unwrap();
    let cannon = engine.spawn_hostile(EnemyKind::GoblinCannoneer, DVec2::new(13.0, 1.4));
    assert_eq!(
        engine.unit_state(cannon).unwrap().current_target,
        Some(TargetRef::Wall(walls[10]))
    );

    let first = engine.tick();
    assert!(first.events.contains(&SiegeEvent::GapBlocked {
        unit: cannon,
        wall: walls[0],
    }));
    let view = first.units.iter().find(|u| u.unit == cannon).unwrap();
    assert_eq!(view.target, Some(TargetRef::Wall(walls[0])));

    let later = run(&mut engine, RETARGET_FRAMES);
    let state = engine.unit_state(cannon).unwrap();
    assert!(!state.gap_blocked, "retarget tick releases the latch");
    assert_eq!(state.current_target, Some(TargetRef::Wall(walls[0])));
    assert!(!later
        .iter()
        .any(|e| matches!(e, SiegeEvent::GapBlocked { .. })));
}

#[test]
fn test_gap_latch_outlasts_retarget_in_same_frame() {
    // Every frame is a retarget frame.
    let mut engine = SiegeEngine::new(SimConfig {
        seed: 4,
        siege: SiegeConfig {
            retarget_interval_secs: DT / 2.0,
            ..Default::default()
        },
    })
    .unwrap();
    let walls = engine.build_fortress().unwrap();
    let worker = engine.spawn_mobile(MobileKind::Worker, DVec2::new(13.0, 20.0));
    let archer = engine.spawn_hostile(EnemyKind::BowOrc, DVec2::new(13.0, 1.4));
    assert_eq!(
        engine.unit_state(archer).unwrap().current_target,
        Some(TargetRef::Mobile(worker))
    );

    let snap = engine.tick();
    assert!(snap.events.contains(&SiegeEvent::GapBlocked {
        unit: archer,
        wall: walls[0],
    }));
    let view = snap.units.iter().find(|u| u.unit == archer).unwrap();
    assert_eq!(view.target, Some(TargetRef::Wall(walls[0])));
    assert!(engine.unit_state(archer).unwrap().gap_blocked);

    engine.tick();
    let state = engine.unit_state(archer).unwrap();
    assert!(!state.gap_blocked);
    assert_eq!(state.current_target, Some(TargetRef::Mobile(worker)));
}

// ---- Retreat ----

#[test]
fn test_nightfall_retreat_is_terminal() {
    let (mut engine, walls) = engine_with_fortress(5);
    engine.spawn_mobile(MobileKind::Worker, DVec2::new(0.0, -5.0));
    let units = [
        engine.spawn_hostile(EnemyKind::Orc, DVec2::new(30.0, 5.0)),
        engine.spawn_hostile(EnemyKind::Troll, DVec2::new(-5.0, 30.0)),
        engine.spawn_hostile(EnemyKind::BowOrc, DVec2::new(0.0, -30.0)),
        engine.spawn_hostile(EnemyKind::GoblinCannoneer, DVec2::new(25.0, -20.0)),
    ];
    run(&mut engine, 10);

    engine.queue_command(SiegeCommand::Nightfall);
    let snap = engine.tick();
    assert_eq!(snap.time_of_day, TimeOfDay::Night);
    assert!(snap.events.contains(&SiegeEvent::Nightfall { retreating: 4 }));

    let destinations: Vec<_> = units
        .iter()
        .map(|u| engine.unit_state(*u).unwrap().destination)
        .collect();

    // Breaches and exposed workers must not pull anyone back.
    engine.destroy_wall(walls[0]).unwrap();
    let events = run(&mut engine, 100);

    for (unit, destination) in units.iter().zip(destinations) {
        let state = engine.unit_state(*unit).unwrap();
        assert!(state.is_retreating);
        assert!(!state.gap_blocked);
        assert_eq!(state.current_target, None);
        assert_eq!(state.destination, destination);
        assert_eq!(destination.map(|d| d.x), Some(engine.config().west_edge_x));
        assert_eq!(target_changes(&events, *unit), 0);
    }
}

#[test]
fn test_retreat_arrival_despawns_unit() {
    let mut engine = engine(2);
    let orc = engine.spawn_hostile(EnemyKind::Orc, DVec2::new(-55.0, 3.0));
    assert_eq!(engine.nightfall(), 1);

    let events = run(&mut engine, 60);
    assert!(events.contains(&SiegeEvent::RetreatArrived { unit: orc }));
    assert_eq!(engine.unit_count(), 0);
    assert!(matches!(engine.unit_state(orc), Err(EngineError::UnknownUnit(_))));
}

#[test]
fn test_retreat_waits_for_pending_path() {
    let mut engine = SiegeEngine::with_planner(
        SimConfig::default(),
        Box::new(DirectPlanner::with_pending_delay(90)),
    )
    .unwrap();
    let orc = engine.spawn_hostile(EnemyKind::Orc, DVec2::new(-59.5, 3.0));
    engine.nightfall();

    let events = run(&mut engine, 60);
    assert!(!events.contains(&SiegeEvent::RetreatArrived { unit: orc }));
    assert_eq!(engine.unit_count(), 1);

    let events = run(&mut engine, 60);
    assert!(events.contains(&SiegeEvent::RetreatArrived { unit: orc }));
}

#[test]
fn test_night_assault_keeps_attacking() {
    let mut engine = SiegeEngine::new(SimConfig {
        siege: SiegeConfig {
            night_assault: true,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();
    let orc = engine.spawn_hostile(EnemyKind::Orc, DVec2::new(30.0, 0.0));
    assert_eq!(engine.nightfall(), 0);
    let snap = engine.tick();
    assert_eq!(snap.time_of_day, TimeOfDay::Night);
    assert!(!engine.unit_state(orc).unwrap().is_retreating);

    engine.queue_command(SiegeCommand::Daybreak);
    assert_eq!(engine.tick().time_of_day, TimeOfDay::Day);
}

#[test]
fn test_sim_config_from_partial_json() {
    let config: SimConfig =
        serde_json::from_str(r#"{ "seed": 9, "siege": { "night_assault": true } }"#).unwrap();
    assert_eq!(config.seed, 9);
    assert!(config.siege.night_assault);
    assert_eq!(config.siege.approach_model, ApproachModel::Rings);
    assert!(SiegeEngine::new(config).is_ok());
}
