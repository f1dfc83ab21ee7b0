//! Spawn factories for hostile units and mobile entities, plus the default
//! fortress layout.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use siege_ai::fsm::{policy_for, PolicyFn};
use siege_ai::profiles::get_profile;
use siege_core::components::*;
use siege_core::constants::*;
use siege_core::enums::*;
use siege_core::error::WallError;
use siege_core::types::{MobileId, UnitId, WallId};
use siege_core::walls::{TopologyObserver, WallRegistry};

/// Per-unit decision wiring, fixed at spawn.
#[derive(Clone, Copy)]
pub struct Brain {
    pub policy: PolicyFn,
    pub move_speed: f64,
}

pub fn unit_id(entity: Entity) -> UnitId {
    UnitId(entity.to_bits().get())
}

pub fn mobile_id(entity: Entity) -> MobileId {
    MobileId(entity.to_bits().get())
}

/// Build the default closed ring around `center`. Segment 0 is centered on
/// the eastern (+x) axis and ids run counter-clockwise.
pub fn build_fortress(
    walls: &mut WallRegistry,
    center: DVec2,
    observer: &mut dyn TopologyObserver,
) -> Result<Vec<WallId>, WallError> {
    let count = FORTRESS_WALL_COUNT;
    walls.build_ring(
        center,
        FORTRESS_RADIUS,
        count,
        -180.0 / count as f64,
        WALL_MAX_HP,
        observer,
    )
}

/// Spawn a hostile unit. The first retarget tick lands at a random phase
/// within the interval so units do not all retarget on the same frame.
pub fn spawn_hostile(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: EnemyKind,
    position: DVec2,
    retarget_interval: f64,
) -> Entity {
    let profile = get_profile(kind);
    let state = TargetAcquisitionState {
        retarget_timer: rng.gen_range(0.0..retarget_interval.max(DT)),
        ..Default::default()
    };
    world.spawn((
        Hostile {
            kind,
            archetype: profile.archetype,
        },
        GroundPosition(position),
        state,
        Brain {
            policy: policy_for(profile.archetype),
            move_speed: profile.move_speed,
        },
    ))
}

/// Spawn a defender, worker or refugee.
pub fn spawn_mobile(world: &mut World, kind: MobileKind, position: DVec2) -> Entity {
    let entity = world.spawn((MobileEntity {
        id: MobileId(0),
        kind,
        position,
        is_dead: false,
    },));
    if let Ok(mut mobile) = world.get::<&mut MobileEntity>(entity) {
        mobile.id = mobile_id(entity);
    }
    entity
}

/// Living and dead mobile entities split by provider, in spawn order.
#[derive(Debug, Default)]
pub struct MobileLists {
    pub defenders: Vec<MobileEntity>,
    pub workers: Vec<MobileEntity>,
    pub refugees: Vec<MobileEntity>,
}

impl MobileLists {
    pub fn collect(world: &World) -> Self {
        let mut lists = Self::default();
        let mut query = world.query::<&MobileEntity>();
        let mut all: Vec<MobileEntity> = query.iter().map(|(_, m)| *m).collect();
        all.sort_by_key(|m| m.id.0);
        for mobile in all {
            match mobile.kind {
                MobileKind::Defender => lists.defenders.push(mobile),
                MobileKind::Worker => lists.workers.push(mobile),
                MobileKind::Refugee => lists.refugees.push(mobile),
            }
        }
        lists
    }

    pub fn snapshot(&self) -> MobileSnapshot<'_> {
        MobileSnapshot {
            defenders: &self.defenders,
            workers: &self.workers,
            refugees: &self.refugees,
        }
    }
}
