//! Shared primitive types used across the planner.

use crate::channel::Channel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier of a hotspot. Assigned by the store on insert;
/// the generator hands out provisional ids starting at 1.
pub type HotspotId = i64;

/// One axis of a grid position. Positions are whole distance units.
pub type Coord = i64;

/// Snapshot ledger version. Starts at 1, always previous max + 1.
pub type SnapshotVersion = u32;

/// Upper bound of both axes in the default planning domain.
pub const DEFAULT_AXIS_MAX: Coord = 5000;

/// Largest coordinate magnitude a domain may use. Keeps every difference
/// of two coordinates, and the span of any axis, inside `Coord`.
pub const COORD_LIMIT: Coord = i32::MAX as Coord;

/// A placed transmitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id:      HotspotId,
    pub x:       Coord,
    pub y:       Coord,
    pub channel: Channel,
}

impl Hotspot {
    pub fn new(id: HotspotId, x: Coord, y: Coord, channel: Channel) -> Self {
        Self { id, x, y, channel }
    }

    pub fn position(&self) -> (Coord, Coord) {
        (self.x, self.y)
    }

    /// Euclidean distance to another hotspot.
    pub fn distance_to(&self, other: &Hotspot) -> f64 {
        distance(self.position(), other.position())
    }
}

/// Euclidean distance between two grid positions.
pub fn distance(a: (Coord, Coord), b: (Coord, Coord)) -> f64 {
    let dx = (b.0 - a.0) as f64;
    let dy = (b.1 - a.1) as f64;
    dx.hypot(dy)
}

/// Inclusive integer rectangle hotspots may be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBounds {
    pub x_min: Coord,
    pub x_max: Coord,
    pub y_min: Coord,
    pub y_max: Coord,
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self::square(1, DEFAULT_AXIS_MAX)
    }
}

impl DomainBounds {
    /// Same inclusive range `[min, max]` on both axes.
    pub fn square(min: Coord, max: Coord) -> Self {
        Self { x_min: min, x_max: max, y_min: min, y_max: max }
    }

    /// A domain with zero extent on either axis cannot hold a placement.
    pub fn is_degenerate(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }

    /// True if any corner lies outside `[-COORD_LIMIT, COORD_LIMIT]`.
    pub fn exceeds_coord_limit(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .any(|c| c.unsigned_abs() > COORD_LIMIT as u64)
    }

    pub fn contains(&self, x: Coord, y: Coord) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// Logical channel assignment `{id -> channel}` over a fixed placement.
pub type Assignment = BTreeMap<HotspotId, Channel>;

/// The assignment carried by an ordered hotspot set.
pub fn assignment_of(hotspots: &[Hotspot]) -> Assignment {
    hotspots.iter().map(|h| (h.id, h.channel.clone())).collect()
}
