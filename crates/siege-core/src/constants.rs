//! Simulation constants and tuning parameters.
//!
//! Distances are in world units (one unit is roughly one meter of ground).
//! Most of these are defaults for `SiegeConfig` fields and can be
//! overridden per session.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Fortress layout ---

/// Default fortress center on the ground plane.
pub const FORTRESS_CENTER: (f64, f64) = (0.0, 0.0);

/// Radius of the default wall ring built by the world setup helpers.
pub const FORTRESS_RADIUS: f64 = 12.0;

/// Number of segments in the default wall ring.
pub const FORTRESS_WALL_COUNT: u32 = 25;

/// Half of a wall segment's length along the perimeter.
pub const WALL_HALF_SPAN: f64 = 1.5;

/// Hit points of a freshly built wall.
pub const WALL_MAX_HP: f64 = 100.0;

/// Distance outward from a wall center used as the attack destination,
/// so the planner does not route around the wall.
pub const WALL_FACE_OFFSET: f64 = 1.0;

/// X coordinate of the western map edge that retreating units head for.
pub const WEST_EDGE_X: f64 = -60.0;

// --- Cost field ---

/// Number of integer-degree buckets in the cost field.
pub const COST_FIELD_RAYS: usize = 360;

/// Half-width (degrees) of the window scanned around a unit's bearing.
pub const BEST_RAY_HALF_WINDOW_DEG: u32 = 60;

/// Ray parameter must exceed this to count as "forward".
pub const RAY_MIN_T: f64 = 1e-9;

/// Cross products below this magnitude are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Segment parameters this close to 0 or 1 snap to the endpoint, so a
/// shared tower point is credited to exactly one wall despite rounding.
pub const SEGMENT_ENDPOINT_SNAP: f64 = 1e-6;

// --- Approach evaluator ---

/// Number of coarse spokes sampled around the fortress.
pub const APPROACH_SAMPLES: u32 = 24;

/// Maximum projection distance from the center for a wall to be scanned.
pub const APPROACH_SCAN_DISTANCE: f64 = 40.0;

/// Maximum perpendicular offset of a wall center from a spoke.
pub const APPROACH_PERPENDICULAR_TOLERANCE: f64 = 2.0;

/// Walls further apart than this along a spoke belong to different rings.
pub const APPROACH_RING_TOLERANCE: f64 = 2.5;

// --- Targeting ---

/// Seconds between scheduled retarget ticks of a single unit.
pub const RETARGET_INTERVAL_SECS: f64 = 1.0;

/// Melee units notice exposed mobile entities within this radius.
pub const MELEE_INTERCEPT_RADIUS: f64 = 8.0;

/// Melee units abandon a wall target for mobile entities within this radius.
pub const MELEE_DIVERT_RADIUS: f64 = 3.0;

/// Units closer than this to the fortress center are inside the walls.
pub const INTERIOR_RADIUS: f64 = 9.0;

/// A melee unit this close to a breach center has reached the gap and
/// presses on to the fortress center.
pub const BREACH_ENTRY_RADIUS: f64 = 1.0;

/// Half-width of the capsule swept between a ranged unit and its quarry.
/// Wide enough to bridge the small gaps between adjacent segments.
pub const SIGHT_SWEEP_RADIUS: f64 = 0.6;

// --- Gap guard ---

/// A unit this close to an intact wall center is suspected of squeezing
/// through a gap.
pub const GAP_PROXIMITY: f64 = 2.0;

/// A destroyed wall within this radius means the unit is using a real breach.
pub const BREACH_DETECT_RADIUS: f64 = 5.0;

// --- Retreat ---

/// Distance from the western edge at which a retreating unit has arrived.
pub const RETREAT_ARRIVAL_TOLERANCE: f64 = 1.5;

// --- Path planner ---

/// Remaining distance below which the planner reports arrival.
pub const PLANNER_STOPPING_DISTANCE: f64 = 0.25;
