//! Per-degree wall-crossing cost field around the fortress.
//!
//! Each of the 360 buckets counts how many blocking wall segments a ray from
//! the fortress center crosses at that integer degree. The field is rebuilt
//! in full whenever wall topology changes; there is no incremental update.

use glam::DVec2;
use tracing::debug;

use siege_core::config::SiegeConfig;
use siege_core::constants::{BEST_RAY_HALF_WINDOW_DEG, COST_FIELD_RAYS};
use siege_core::geometry::{
    bearing_degrees, degree_index, direction_from_degrees, ray_segment_intersection, wrap_index,
};
use siege_core::types::WallId;
use siege_core::walls::{TopologyChange, TopologyObserver, WallRegistry};

/// Ray parameters closer than this are considered the same distance.
const TIE_EPSILON: f64 = 1e-9;

/// Crossing data for one integer-degree ray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RayBucket {
    /// Number of distinct blocking segments the ray crosses.
    pub cost: u32,
    /// Crossed segment nearest the fortress center.
    pub innermost: Option<WallId>,
    /// Crossed segment farthest from the fortress center.
    pub outermost: Option<WallId>,
}

/// Result of a windowed best-ray query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestRay {
    pub index: usize,
    pub cost: u32,
    /// Innermost wall on the chosen ray, `None` when the ray is clear.
    pub wall: Option<WallId>,
    /// Signed offset in degrees from the unit's direct bearing.
    pub offset: i32,
}

/// Running best crossing for a bucket: `(t, center distance, id)`.
type Crossing = (f64, f64, WallId);

#[derive(Debug, Clone)]
pub struct CostField {
    center: DVec2,
    window_half_width: u32,
    buckets: [RayBucket; COST_FIELD_RAYS],
    max_cost: u32,
}

impl Default for CostField {
    fn default() -> Self {
        Self::new(DVec2::ZERO, BEST_RAY_HALF_WINDOW_DEG)
    }
}

impl CostField {
    /// An empty field (open ground everywhere) around `center`.
    pub fn new(center: DVec2, window_half_width: u32) -> Self {
        Self {
            center,
            window_half_width: window_half_width.min(180),
            buckets: [RayBucket::default(); COST_FIELD_RAYS],
            max_cost: 0,
        }
    }

    pub fn from_config(config: &SiegeConfig) -> Self {
        Self::new(config.fortress_center, config.ray_window_half_width_deg)
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn max_cost(&self) -> u32 {
        self.max_cost
    }

    /// Bucket at `index`, wrapping past 359.
    pub fn bucket(&self, index: usize) -> &RayBucket {
        &self.buckets[index % COST_FIELD_RAYS]
    }

    pub fn cost_at(&self, index: usize) -> u32 {
        self.bucket(index).cost
    }

    /// Rebuild every bucket from the registry. A missing registry is open
    /// ground: cost 0 and no walls on every ray.
    pub fn recalculate(&mut self, walls: Option<&WallRegistry>) {
        self.buckets = [RayBucket::default(); COST_FIELD_RAYS];
        self.max_cost = 0;

        let Some(registry) = walls else {
            return;
        };

        let segments: Vec<(WallId, DVec2, DVec2, f64)> = registry
            .blocking()
            .map(|w| {
                let (a, b) = w.endpoints();
                (w.id, a, b, w.center.distance(self.center))
            })
            .collect();
        if segments.is_empty() {
            return;
        }

        for (index, bucket) in self.buckets.iter_mut().enumerate() {
            let dir = direction_from_degrees(index as f64);
            let mut innermost: Option<Crossing> = None;
            let mut outermost: Option<Crossing> = None;

            for &(id, a, b, center_dist) in &segments {
                let Some((t, _u)) = ray_segment_intersection(self.center, dir, a, b) else {
                    continue;
                };
                bucket.cost += 1;

                let closer = match innermost {
                    None => true,
                    Some((best_t, best_d, _)) => {
                        t < best_t - TIE_EPSILON
                            || ((t - best_t).abs() <= TIE_EPSILON && center_dist < best_d)
                    }
                };
                if closer {
                    innermost = Some((t, center_dist, id));
                }

                let farther = match outermost {
                    None => true,
                    Some((best_t, best_d, _)) => {
                        t > best_t + TIE_EPSILON
                            || ((t - best_t).abs() <= TIE_EPSILON && center_dist > best_d)
                    }
                };
                if farther {
                    outermost = Some((t, center_dist, id));
                }
            }

            bucket.innermost = innermost.map(|(_, _, id)| id);
            bucket.outermost = outermost.map(|(_, _, id)| id);
            self.max_cost = self.max_cost.max(bucket.cost);
        }
    }

    /// Cheapest ray within the window around the unit's direct bearing.
    ///
    /// Minimum cost wins; equal costs go to the smaller absolute offset, and
    /// an exact `+k`/`-k` tie goes to the counter-clockwise `+k` ray.
    pub fn best_ray(&self, unit_position: DVec2) -> BestRay {
        let base = degree_index(bearing_degrees(self.center, unit_position));
        let mut best = self.ray_at(base, 0);

        for k in 1..=self.window_half_width as i32 {
            if best.cost == 0 {
                break;
            }
            for offset in [k, -k] {
                let candidate = self.ray_at(wrap_index(base as i64 + offset as i64), offset);
                if candidate.cost < best.cost {
                    best = candidate;
                }
            }
        }
        best
    }

    fn ray_at(&self, index: usize, offset: i32) -> BestRay {
        let bucket = self.bucket(index);
        BestRay {
            index,
            cost: bucket.cost,
            wall: bucket.innermost,
            offset,
        }
    }
}

impl TopologyObserver for CostField {
    fn on_topology_changed(&mut self, registry: &WallRegistry, change: TopologyChange) {
        self.recalculate(Some(registry));
        debug!(?change, max_cost = self.max_cost, "cost field rebuilt");
    }
}
