//! Archetype targeting policies.
//!
//! Each policy degrades to "head to the fortress center" when its data
//! source is empty. Stale targets (destroyed walls, dead or despawned
//! mobiles) are re-validated on every call. A retreating unit is held as
//! is by every policy.

use tracing::debug;

use siege_core::enums::ApproachModel;

use crate::approach::find_best_approach_wall;
use crate::fsm::{
    engage_mobile, engage_wall, head_to_center, hold, retarget, TargetContext, TargetUpdate,
};
use crate::sight::first_blocking_wall;

/// Melee and wall-breaker policy.
///
/// 1. Snipe an exposed mobile entity within the intercept radius, unless
///    busy with a wall and the entity is outside the divert radius.
/// 2. Rush the nearest breach, or the center once it reaches the gap.
/// 3. Keep a live wall target.
/// 4. Ask the approach model which outer wall to open.
pub fn melee(ctx: &TargetContext) -> TargetUpdate {
    if ctx.state.is_retreating {
        return hold(ctx);
    }
    let config = ctx.config;
    let wall_target = ctx.live_wall_target();

    if let Some(mobile) = ctx
        .mobiles
        .nearest_living(ctx.position, Some(config.melee_intercept_radius))
    {
        let dist = mobile.position.distance(ctx.position);
        if wall_target.is_none() || dist <= config.melee_divert_radius {
            debug!(mobile = ?mobile.id, dist, "melee intercepting mobile");
            return engage_mobile(ctx, mobile);
        }
    }

    let Some(registry) = ctx.walls else {
        return head_to_center(ctx);
    };

    if let Some(breach) = registry.nearest_destroyed(ctx.position) {
        if ctx.has_entered(breach) {
            return head_to_center(ctx);
        }
        return retarget(ctx, None, breach.center);
    }

    if wall_target.is_some() {
        return hold(ctx);
    }

    if config.approach_model == ApproachModel::RayCost {
        if let Some(update) = approach_by_ray_cost(ctx) {
            return update;
        }
    }

    let approach = find_best_approach_wall(
        ctx.fortress_center(),
        ctx.position,
        Some(registry),
        &config.approach,
    );
    match approach.wall.and_then(|id| registry.get(id)) {
        Some(wall) if !approach.has_open_path => engage_wall(ctx, wall),
        _ => head_to_center(ctx),
    }
}

/// Cost-field variant of the approach step. `None` when the field is
/// unavailable or points at a wall that no longer blocks.
fn approach_by_ray_cost(ctx: &TargetContext) -> Option<TargetUpdate> {
    let field = ctx.cost_field?;
    let registry = ctx.walls?;
    let best = field.best_ray(ctx.position);
    if best.cost == 0 {
        return Some(head_to_center(ctx));
    }
    let wall = field
        .bucket(best.index)
        .outermost
        .and_then(|id| registry.get(id))
        .filter(|w| w.blocks())?;
    Some(engage_wall(ctx, wall))
}

/// Ranged policy.
///
/// Hunts the nearest living mobile entity anywhere on the map. If a wall
/// stands in the swept sight line, that wall becomes the target instead.
/// Without mobiles, attacks the closest wall (weakest on a distance tie).
pub fn ranged(ctx: &TargetContext) -> TargetUpdate {
    if ctx.state.is_retreating {
        return hold(ctx);
    }
    let config = ctx.config;

    if let Some(mobile) = ctx.mobiles.nearest_living(ctx.position, None) {
        let blocker = ctx.walls.and_then(|registry| {
            first_blocking_wall(ctx.position, mobile.position, registry, config.sight_sweep_radius)
        });
        return match blocker {
            Some(wall) => engage_wall(ctx, wall),
            None => engage_mobile(ctx, mobile),
        };
    }

    let closest = ctx.walls.and_then(|registry| {
        registry.blocking().min_by(|a, b| {
            a.center
                .distance(ctx.position)
                .total_cmp(&b.center.distance(ctx.position))
                .then(a.current_hp.total_cmp(&b.current_hp))
        })
    });
    match closest {
        Some(wall) => engage_wall(ctx, wall),
        None => head_to_center(ctx),
    }
}

/// Siege policy (suicide bombers and artillery).
///
/// Ignores mobiles and breaches. Keeps a live wall target, otherwise picks
/// the weakest blocking wall, closest on an HP tie.
pub fn siege(ctx: &TargetContext) -> TargetUpdate {
    if ctx.state.is_retreating || ctx.live_wall_target().is_some() {
        return hold(ctx);
    }

    let weakest = ctx.walls.and_then(|registry| {
        registry.blocking().min_by(|a, b| {
            a.current_hp.total_cmp(&b.current_hp).then(
                a.center
                    .distance(ctx.position)
                    .total_cmp(&b.center.distance(ctx.position)),
            )
        })
    });
    match weakest {
        Some(wall) => engage_wall(ctx, wall),
        None => head_to_center(ctx),
    }
}
