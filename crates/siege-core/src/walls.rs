//! Perimeter wall segments and the registry that owns them.
//!
//! The registry is the single writer of wall topology. Every mutation that
//! changes which segments block movement notifies a `TopologyObserver`
//! before returning, so dependent caches are never read half-built.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::WallError;
use crate::geometry::{direction_from_degrees, safe_normalize};
use crate::types::WallId;

/// A straight wall segment between two tower posts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub id: WallId,
    pub center: DVec2,
    /// Unit vector facing away from the fortress.
    pub orientation: DVec2,
    /// Half of the segment length along the perimeter.
    pub half_span: f64,
    pub current_hp: f64,
    pub max_hp: f64,
    pub is_destroyed: bool,
    pub is_under_construction: bool,
}

impl WallSegment {
    /// Whether this segment currently blocks movement and line of sight.
    pub fn blocks(&self) -> bool {
        !self.is_destroyed && !self.is_under_construction
    }

    /// Endpoints `(a, b)`. Seen from outside, `a` is the left post; a ray
    /// through a shared post is credited to the segment whose `a` it is.
    pub fn endpoints(&self) -> (DVec2, DVec2) {
        let along = self.orientation.perp() * self.half_span;
        (self.center - along, self.center + along)
    }

    /// Point `offset` units outward from the center along the normal.
    pub fn outward_face(&self, offset: f64) -> DVec2 {
        self.center + self.orientation * offset
    }
}

/// What changed in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyChange {
    Built(WallId),
    Completed(WallId),
    Destroyed(WallId),
    Repaired(WallId),
}

/// Receives a synchronous callback after every topology change.
pub trait TopologyObserver {
    fn on_topology_changed(&mut self, registry: &WallRegistry, change: TopologyChange);
}

/// No-op observer for callers that do not cache anything.
impl TopologyObserver for () {
    fn on_topology_changed(&mut self, _registry: &WallRegistry, _change: TopologyChange) {}
}

/// Live set of perimeter segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallRegistry {
    walls: Vec<WallSegment>,
    next_id: u32,
}

impl WallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every segment, including destroyed and unfinished ones.
    pub fn all_walls(&self) -> &[WallSegment] {
        &self.walls
    }

    /// Segments that currently block movement.
    pub fn blocking(&self) -> impl Iterator<Item = &WallSegment> {
        self.walls.iter().filter(|w| w.blocks())
    }

    pub fn get(&self, id: WallId) -> Option<&WallSegment> {
        self.walls.iter().find(|w| w.id == id)
    }

    /// Whether `id` names a segment that still blocks. Stale ids are not live.
    pub fn is_live(&self, id: WallId) -> bool {
        self.get(id).is_some_and(|w| w.blocks())
    }

    /// Any segment destroyed.
    pub fn has_breach(&self) -> bool {
        self.walls.iter().any(|w| w.is_destroyed)
    }

    /// Nearest blocking segment by center distance.
    pub fn nearest_wall(&self, point: DVec2) -> Option<&WallSegment> {
        nearest_by_center(self.blocking(), point)
    }

    /// Nearest destroyed segment by center distance.
    pub fn nearest_destroyed(&self, point: DVec2) -> Option<&WallSegment> {
        nearest_by_center(self.walls.iter().filter(|w| w.is_destroyed), point)
    }

    /// Start building a segment. It does not block until completed.
    pub fn build(
        &mut self,
        center: DVec2,
        orientation: DVec2,
        half_span: f64,
        max_hp: f64,
        observer: &mut dyn TopologyObserver,
    ) -> Result<WallId, WallError> {
        let id = self.insert(center, orientation, half_span, max_hp, true)?;
        observer.on_topology_changed(self, TopologyChange::Built(id));
        Ok(id)
    }

    /// Insert an already finished segment (initial layouts, loaded games).
    pub fn build_complete(
        &mut self,
        center: DVec2,
        orientation: DVec2,
        half_span: f64,
        max_hp: f64,
        observer: &mut dyn TopologyObserver,
    ) -> Result<WallId, WallError> {
        let id = self.insert(center, orientation, half_span, max_hp, false)?;
        observer.on_topology_changed(self, TopologyChange::Completed(id));
        Ok(id)
    }

    /// Insert a finished segment spanning from post `left` to post `right`,
    /// facing outward for a fortress whose posts run counter-clockwise.
    pub fn build_between(
        &mut self,
        left: DVec2,
        right: DVec2,
        max_hp: f64,
        observer: &mut dyn TopologyObserver,
    ) -> Result<WallId, WallError> {
        let along = right - left;
        let tangent = safe_normalize(along).ok_or(WallError::InvalidSegment("posts coincide"))?;
        let orientation = DVec2::new(tangent.y, -tangent.x);
        self.build_complete(
            (left + right) * 0.5,
            orientation,
            along.length() * 0.5,
            max_hp,
            observer,
        )
    }

    /// Insert a closed ring of `count` finished segments whose posts lie on a
    /// circle of `radius`, starting at `start_deg` (counter-clockwise from +x).
    /// Adjacent segments share their posts exactly.
    pub fn build_ring(
        &mut self,
        center: DVec2,
        radius: f64,
        count: u32,
        start_deg: f64,
        max_hp: f64,
        observer: &mut dyn TopologyObserver,
    ) -> Result<Vec<WallId>, WallError> {
        if count < 3 {
            return Err(WallError::InvalidSegment("a ring needs at least three segments"));
        }
        let step = 360.0 / count as f64;
        let post = |k: u32| center + direction_from_degrees(start_deg + step * k as f64) * radius;
        let mut ids = Vec::with_capacity(count as usize);
        for k in 0..count {
            ids.push(self.build_between(post(k), post((k + 1) % count), max_hp, &mut *observer)?);
        }
        Ok(ids)
    }

    pub fn complete_construction(
        &mut self,
        id: WallId,
        observer: &mut dyn TopologyObserver,
    ) -> Result<(), WallError> {
        let wall = self.get_mut(id)?;
        if !wall.is_under_construction {
            return Err(WallError::NotUnderConstruction(id));
        }
        wall.is_under_construction = false;
        wall.current_hp = wall.max_hp;
        observer.on_topology_changed(self, TopologyChange::Completed(id));
        Ok(())
    }

    /// Mark a segment destroyed, opening a breach.
    pub fn destroy(&mut self, id: WallId, observer: &mut dyn TopologyObserver) -> Result<(), WallError> {
        let wall = self.get_mut(id)?;
        if wall.is_destroyed {
            return Err(WallError::AlreadyDestroyed(id));
        }
        wall.is_destroyed = true;
        wall.current_hp = 0.0;
        observer.on_topology_changed(self, TopologyChange::Destroyed(id));
        Ok(())
    }

    /// Restore a destroyed segment to full health.
    pub fn repair(&mut self, id: WallId, observer: &mut dyn TopologyObserver) -> Result<(), WallError> {
        let wall = self.get_mut(id)?;
        if !wall.is_destroyed {
            return Err(WallError::NotDestroyed(id));
        }
        wall.is_destroyed = false;
        wall.current_hp = wall.max_hp;
        observer.on_topology_changed(self, TopologyChange::Repaired(id));
        Ok(())
    }

    /// Record damage dealt by the combat layer. Returns `true` if the hit
    /// destroyed the segment.
    pub fn record_damage(
        &mut self,
        id: WallId,
        amount: f64,
        observer: &mut dyn TopologyObserver,
    ) -> Result<bool, WallError> {
        let wall = self.get_mut(id)?;
        if wall.is_destroyed {
            return Err(WallError::AlreadyDestroyed(id));
        }
        wall.current_hp = (wall.current_hp - amount.max(0.0)).max(0.0);
        if wall.current_hp > 0.0 {
            return Ok(false);
        }
        self.destroy(id, observer)?;
        Ok(true)
    }

    fn insert(
        &mut self,
        center: DVec2,
        orientation: DVec2,
        half_span: f64,
        max_hp: f64,
        under_construction: bool,
    ) -> Result<WallId, WallError> {
        let orientation =
            safe_normalize(orientation).ok_or(WallError::InvalidSegment("zero-length orientation"))?;
        if !half_span.is_finite() || half_span <= 0.0 {
            return Err(WallError::InvalidSegment("half span must be positive"));
        }
        if !max_hp.is_finite() || max_hp <= 0.0 {
            return Err(WallError::InvalidSegment("max hp must be positive"));
        }

        let id = WallId(self.next_id);
        self.next_id += 1;
        self.walls.push(WallSegment {
            id,
            center,
            orientation,
            half_span,
            current_hp: if under_construction { 0.0 } else { max_hp },
            max_hp,
            is_destroyed: false,
            is_under_construction: under_construction,
        });
        Ok(id)
    }

    fn get_mut(&mut self, id: WallId) -> Result<&mut WallSegment, WallError> {
        self.walls
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(WallError::UnknownWall(id))
    }
}

fn nearest_by_center<'a>(
    walls: impl Iterator<Item = &'a WallSegment>,
    point: DVec2,
) -> Option<&'a WallSegment> {
    walls.min_by(|a, b| {
        a.center
            .distance_squared(point)
            .total_cmp(&b.center.distance_squared(point))
    })
}
