//! Ground-plane geometry helpers.
//!
//! Pure functions over `DVec2`. Angles are measured counter-clockwise from
//! +x in degrees, matching the cost field's bucket indices.

use glam::DVec2;

use crate::constants::{COST_FIELD_RAYS, PARALLEL_EPSILON, RAY_MIN_T, SEGMENT_ENDPOINT_SNAP};

/// Intersect a ray with a segment using the cross-product solution.
///
/// Returns `(t, u)` where `origin + t * dir` is the hit point and `a + u * (b - a)`
/// is the same point on the segment. `t` must be strictly positive and `u`
/// must lie in the half-open range `[0, 1)`: the `b` endpoint belongs to the
/// neighbouring segment that starts there. Near-parallel pairs never hit.
pub fn ray_segment_intersection(origin: DVec2, dir: DVec2, a: DVec2, b: DVec2) -> Option<(f64, f64)> {
    let s = b - a;
    let denom = dir.perp_dot(s);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let ao = a - origin;
    let t = ao.perp_dot(s) / denom;
    let mut u = ao.perp_dot(dir) / denom;

    if u.abs() < SEGMENT_ENDPOINT_SNAP {
        u = 0.0;
    } else if (u - 1.0).abs() < SEGMENT_ENDPOINT_SNAP {
        u = 1.0;
    }

    if t > RAY_MIN_T && (0.0..1.0).contains(&u) {
        Some((t, u))
    } else {
        None
    }
}

/// Shortest distance from `p` to the closed segment `a..b`.
pub fn point_segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < PARALLEL_EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Whether the closed segments `p1..p2` and `q1..q2` cross or touch.
pub fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> bool {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.perp_dot(s);
    if denom.abs() < PARALLEL_EPSILON {
        return false;
    }
    let qp = q1 - p1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Shortest distance between two closed segments.
pub fn segment_segment_distance(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2) -> f64 {
    if segments_intersect(p1, p2, q1, q2) {
        return 0.0;
    }
    point_segment_distance(p1, q1, q2)
        .min(point_segment_distance(p2, q1, q2))
        .min(point_segment_distance(q1, p1, p2))
        .min(point_segment_distance(q2, p1, p2))
}

/// Signed distance of `p` from the line through `origin` with unit `normal`.
/// Positive on the side the normal points to.
pub fn signed_distance(p: DVec2, origin: DVec2, normal: DVec2) -> f64 {
    (p - origin).dot(normal)
}

/// Bearing from `from` to `to` in degrees, in `[0, 360)`.
pub fn bearing_degrees(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees().rem_euclid(360.0)
}

/// Round a bearing in degrees to its cost-field bucket index.
pub fn degree_index(bearing_deg: f64) -> usize {
    let rounded = bearing_deg.round() as i64;
    rounded.rem_euclid(COST_FIELD_RAYS as i64) as usize
}

/// Wrap a possibly negative index offset back into `0..360`.
pub fn wrap_index(index: i64) -> usize {
    index.rem_euclid(COST_FIELD_RAYS as i64) as usize
}

/// Unit direction vector for an angle in degrees.
pub fn direction_from_degrees(deg: f64) -> DVec2 {
    let rad = deg.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

/// Normalize `v`, or `None` for a zero-length vector.
pub fn safe_normalize(v: DVec2) -> Option<DVec2> {
    let len = v.length();
    if len < PARALLEL_EPSILON {
        None
    } else {
        Some(v / len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_segment_ahead() {
        let hit = ray_segment_intersection(
            DVec2::ZERO,
            DVec2::X,
            DVec2::new(5.0, -1.0),
            DVec2::new(5.0, 1.0),
        );
        let (t, u) = hit.expect("ray should cross the segment");
        assert!((t - 5.0).abs() < 1e-9);
        assert!((u - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_ray_ignores_segment_behind() {
        let hit = ray_segment_intersection(
            DVec2::ZERO,
            DVec2::X,
            DVec2::new(-5.0, -1.0),
            DVec2::new(-5.0, 1.0),
        );
        assert!(hit.is_none(), "segments behind the origin must not count");
    }

    #[test]
    fn test_parallel_ray_is_no_hit() {
        let hit = ray_segment_intersection(
            DVec2::ZERO,
            DVec2::X,
            DVec2::new(1.0, 0.0),
            DVec2::new(4.0, 0.0),
        );
        assert!(hit.is_none(), "collinear segment should be treated as no intersection");
    }

    #[test]
    fn test_half_open_endpoint() {
        // Ray through (5, 0), which is the `a` end of one segment and the
        // `b` end of the other.
        let start = ray_segment_intersection(
            DVec2::ZERO,
            DVec2::X,
            DVec2::new(5.0, 0.0),
            DVec2::new(5.0, 2.0),
        );
        let end = ray_segment_intersection(
            DVec2::ZERO,
            DVec2::X,
            DVec2::new(5.0, -2.0),
            DVec2::new(5.0, 0.0),
        );
        assert!(start.is_some(), "u = 0 endpoint is included");
        assert!(end.is_none(), "u = 1 endpoint is excluded");
    }

    #[test]
    fn test_segment_distance() {
        let d = segment_segment_distance(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 2.0),
            DVec2::new(5.0, 4.0),
        );
        assert!((d - 2.0).abs() < 1e-9);

        let crossing = segment_segment_distance(
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, -1.0),
            DVec2::new(5.0, 1.0),
        );
        assert_eq!(crossing, 0.0);
    }

    #[test]
    fn test_bearing_and_index() {
        assert_eq!(degree_index(bearing_degrees(DVec2::ZERO, DVec2::new(0.0, 10.0))), 90);
        assert_eq!(degree_index(bearing_degrees(DVec2::ZERO, DVec2::new(0.0, -10.0))), 270);
        assert_eq!(degree_index(359.6), 0, "rounding wraps past 359");
        assert_eq!(wrap_index(-1), 359);
    }

    #[test]
    fn test_safe_normalize_zero() {
        assert!(safe_normalize(DVec2::ZERO).is_none());
        let n = safe_normalize(DVec2::new(3.0, 4.0)).unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
    }
}
