//! Tunable parameters for a siege session.
//!
//! Every field has a default from `constants`, so a host can load a partial
//! JSON document and override only what it needs.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::ApproachModel;
use crate::error::ConfigError;

/// Spoke sampling parameters for the approach evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproachParams {
    /// Number of coarse directions sampled around the fortress.
    pub samples: u32,
    /// Maximum projection distance from the center.
    pub scan_distance: f64,
    /// Maximum perpendicular offset of a wall center from a spoke.
    pub perpendicular_tolerance: f64,
    /// Gap along a spoke that starts a new ring.
    pub ring_tolerance: f64,
}

impl Default for ApproachParams {
    fn default() -> Self {
        Self {
            samples: APPROACH_SAMPLES,
            scan_distance: APPROACH_SCAN_DISTANCE,
            perpendicular_tolerance: APPROACH_PERPENDICULAR_TOLERANCE,
            ring_tolerance: APPROACH_RING_TOLERANCE,
        }
    }
}

/// Configuration for the targeting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiegeConfig {
    pub fortress_center: DVec2,
    pub retarget_interval_secs: f64,
    /// Half-width of the cost field's best-ray window (degrees).
    pub ray_window_half_width_deg: u32,
    pub approach: ApproachParams,
    pub approach_model: ApproachModel,
    pub melee_intercept_radius: f64,
    pub melee_divert_radius: f64,
    pub interior_radius: f64,
    pub breach_entry_radius: f64,
    pub wall_face_offset: f64,
    pub sight_sweep_radius: f64,
    pub gap_proximity: f64,
    pub breach_detect_radius: f64,
    pub west_edge_x: f64,
    pub retreat_arrival_tolerance: f64,
    /// Hostiles keep attacking through the night instead of retreating.
    pub night_assault: bool,
}

impl Default for SiegeConfig {
    fn default() -> Self {
        Self {
            fortress_center: DVec2::new(FORTRESS_CENTER.0, FORTRESS_CENTER.1),
            retarget_interval_secs: RETARGET_INTERVAL_SECS,
            ray_window_half_width_deg: BEST_RAY_HALF_WINDOW_DEG,
            approach: ApproachParams::default(),
            approach_model: ApproachModel::default(),
            melee_intercept_radius: MELEE_INTERCEPT_RADIUS,
            melee_divert_radius: MELEE_DIVERT_RADIUS,
            interior_radius: INTERIOR_RADIUS,
            breach_entry_radius: BREACH_ENTRY_RADIUS,
            wall_face_offset: WALL_FACE_OFFSET,
            sight_sweep_radius: SIGHT_SWEEP_RADIUS,
            gap_proximity: GAP_PROXIMITY,
            breach_detect_radius: BREACH_DETECT_RADIUS,
            west_edge_x: WEST_EDGE_X,
            retreat_arrival_tolerance: RETREAT_ARRIVAL_TOLERANCE,
            night_assault: false,
        }
    }
}

impl SiegeConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SiegeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the policies cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.retarget_interval_secs > 0.0) || !self.retarget_interval_secs.is_finite() {
            return Err(invalid("retarget_interval_secs", "must be positive"));
        }
        if self.ray_window_half_width_deg > 180 {
            return Err(invalid("ray_window_half_width_deg", "must not exceed 180"));
        }
        if self.approach.samples == 0 {
            return Err(invalid("approach.samples", "must be at least 1"));
        }
        if self.approach.scan_distance <= 0.0 {
            return Err(invalid("approach.scan_distance", "must be positive"));
        }
        if self.approach.perpendicular_tolerance < 0.0 || self.approach.ring_tolerance < 0.0 {
            return Err(invalid("approach", "tolerances must not be negative"));
        }
        if self.melee_divert_radius > self.melee_intercept_radius {
            return Err(invalid(
                "melee_divert_radius",
                "must not exceed melee_intercept_radius",
            ));
        }
        let non_negative = [
            ("melee_divert_radius", self.melee_divert_radius),
            ("interior_radius", self.interior_radius),
            ("breach_entry_radius", self.breach_entry_radius),
            ("wall_face_offset", self.wall_face_offset),
            ("sight_sweep_radius", self.sight_sweep_radius),
            ("gap_proximity", self.gap_proximity),
            ("breach_detect_radius", self.breach_detect_radius),
            ("retreat_arrival_tolerance", self.retreat_arrival_tolerance),
        ];
        for (field, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(invalid(field, "must be a finite, non-negative distance"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
