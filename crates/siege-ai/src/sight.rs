//! Swept line-of-sight test against wall segments.
//!
//! A plain ray would slip through the hairline gaps between adjacent
//! segments, so the sight line is swept as a capsule whose radius bridges
//! those gaps.

use glam::DVec2;

use siege_core::geometry::{point_segment_distance, segment_segment_distance};
use siege_core::walls::{WallRegistry, WallSegment};

/// The blocking wall nearest to `from` that the capsule `from..to` of
/// `radius` touches, if any.
pub fn first_blocking_wall<'a>(
    from: DVec2,
    to: DVec2,
    registry: &'a WallRegistry,
    radius: f64,
) -> Option<&'a WallSegment> {
    registry
        .blocking()
        .filter_map(|wall| {
            let (a, b) = wall.endpoints();
            (segment_segment_distance(from, to, a, b) <= radius)
                .then(|| (point_segment_distance(from, a, b), wall))
        })
        .min_by(|x, y| x.0.total_cmp(&y.0))
        .map(|(_, wall)| wall)
}

/// Whether nothing blocks the swept line between two points.
pub fn has_clear_shot(from: DVec2, to: DVec2, registry: &WallRegistry, radius: f64) -> bool {
    first_blocking_wall(from, to, registry, radius).is_none()
}
