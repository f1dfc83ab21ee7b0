//! Ring-based approach evaluator.
//!
//! Samples a handful of coarse spokes around the fortress and counts how
//! many concentric defensive layers ("rings") lie along each one. Unlike the
//! cost field this does not intersect rays with segments: any wall whose
//! center sits close enough to a spoke counts, and walls at similar depth
//! merge into one ring. The two estimators can disagree on the same layout.

use glam::DVec2;

use siege_core::config::ApproachParams;
use siege_core::geometry::direction_from_degrees;
use siege_core::types::WallId;
use siege_core::walls::{WallRegistry, WallSegment};

/// Layers found along one sampled spoke.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproachSample {
    /// Spoke number in `0..samples`.
    pub spoke: u32,
    pub direction: DVec2,
    pub rings: u32,
    /// Wall farthest from the center along this spoke.
    pub outermost: Option<WallId>,
    /// Where a unit taking this spoke first meets a wall.
    pub approach_point: Option<DVec2>,
}

/// Outcome of an approach query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproachResult {
    /// Outer wall to attack on the best spoke.
    pub wall: Option<WallId>,
    /// Some spoke is completely clear; walk straight to the center.
    pub has_open_path: bool,
}

impl ApproachResult {
    const OPEN: ApproachResult = ApproachResult {
        wall: None,
        has_open_path: true,
    };
}

/// Count the rings along spoke `spoke` of `params.samples`.
pub fn sample_spoke(
    center: DVec2,
    registry: &WallRegistry,
    params: &ApproachParams,
    spoke: u32,
) -> ApproachSample {
    let samples = params.samples.max(1);
    let direction = direction_from_degrees(spoke as f64 * 360.0 / samples as f64);

    let mut along: Vec<(f64, &WallSegment)> = registry
        .blocking()
        .filter_map(|wall| {
            let rel = wall.center - center;
            let depth = rel.dot(direction);
            let lateral = direction.perp_dot(rel).abs();
            let on_spoke = depth > 0.0
                && depth <= params.scan_distance
                && lateral <= params.perpendicular_tolerance;
            on_spoke.then_some((depth, wall))
        })
        .collect();
    along.sort_by(|a, b| a.0.total_cmp(&b.0));

    let rings = match along.len() {
        0 => 0,
        _ => {
            1 + along
                .windows(2)
                .filter(|pair| pair[1].0 - pair[0].0 > params.ring_tolerance)
                .count() as u32
        }
    };
    let outer = along.last().map(|(_, wall)| *wall);

    ApproachSample {
        spoke,
        direction,
        rings,
        outermost: outer.map(|w| w.id),
        approach_point: outer.map(|w| w.center),
    }
}

/// Pick the outer wall to attack when no breach exists yet.
///
/// Any clear spoke short-circuits to `has_open_path`. Otherwise the spoke
/// with the fewest rings wins, ties going to the one whose approach point is
/// closest to the unit. A missing or empty registry is open ground.
pub fn find_best_approach_wall(
    center: DVec2,
    unit_position: DVec2,
    walls: Option<&WallRegistry>,
    params: &ApproachParams,
) -> ApproachResult {
    let Some(registry) = walls else {
        return ApproachResult::OPEN;
    };
    if registry.blocking().next().is_none() {
        return ApproachResult::OPEN;
    }

    let mut best: Option<(u32, f64, WallId)> = None;
    for spoke in 0..params.samples.max(1) {
        let sample = sample_spoke(center, registry, params, spoke);
        if sample.rings == 0 {
            return ApproachResult::OPEN;
        }
        let (Some(wall), Some(point)) = (sample.outermost, sample.approach_point) else {
            continue;
        };
        let dist = point.distance(unit_position);
        let better = match best {
            None => true,
            Some((rings, best_dist, _)) => {
                sample.rings < rings || (sample.rings == rings && dist < best_dist)
            }
        };
        if better {
            best = Some((sample.rings, dist, wall));
        }
    }

    ApproachResult {
        wall: best.map(|(_, _, id)| id),
        has_open_path: false,
    }
}
