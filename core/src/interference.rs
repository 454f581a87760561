//! Pairwise co-channel interference model.
//!
//! Two hotspots interfere when they are within the interference radius
//! (inclusive) AND sit on the same known channel. The radius is unrelated
//! to the minimum separation used at placement time.

use crate::types::Hotspot;
use std::collections::BTreeSet;

/// Interference radius of the reference deployment, in distance units.
pub const INTERFERENCE_RADIUS: f64 = 275.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterferenceModel {
    pub radius: f64,
}

impl Default for InterferenceModel {
    fn default() -> Self {
        Self { radius: INTERFERENCE_RADIUS }
    }
}

impl InterferenceModel {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Whether the two hotspots are close enough to hear each other,
    /// regardless of channel.
    pub fn in_range(&self, a: &Hotspot, b: &Hotspot) -> bool {
        a.distance_to(b) <= self.radius
    }

    pub fn interferes(&self, a: &Hotspot, b: &Hotspot) -> bool {
        a.channel.shares_band_with(&b.channel) && self.in_range(a, b)
    }

    /// Number of unordered interfering pairs. O(n²).
    pub fn count_interference(&self, hotspots: &[Hotspot]) -> usize {
        let mut count = 0;
        for (i, a) in hotspots.iter().enumerate() {
            for b in &hotspots[i + 1..] {
                if self.interferes(a, b) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Index pairs `(i, j)`, `i < j`, that interfere.
    pub fn interfering_pairs(&self, hotspots: &[Hotspot]) -> BTreeSet<(usize, usize)> {
        let mut pairs = BTreeSet::new();
        for (i, a) in hotspots.iter().enumerate() {
            for (j, b) in hotspots.iter().enumerate().skip(i + 1) {
                if self.interferes(a, b) {
                    pairs.insert((i, j));
                }
            }
        }
        pairs
    }

    /// Indices taking part in at least one interfering pair.
    pub fn interfering_hotspots(&self, hotspots: &[Hotspot]) -> BTreeSet<usize> {
        self.interfering_pairs(hotspots)
            .into_iter()
            .flat_map(|(i, j)| [i, j])
            .collect()
    }
}

/// Predicate under the default radius.
pub fn interferes(a: &Hotspot, b: &Hotspot) -> bool {
    InterferenceModel::default().interferes(a, b)
}

/// Count under the default radius.
pub fn count_interference(hotspots: &[Hotspot]) -> usize {
    InterferenceModel::default().count_interference(hotspots)
}

/// Pair set under the default radius.
pub fn interfering_pairs(hotspots: &[Hotspot]) -> BTreeSet<(usize, usize)> {
    InterferenceModel::default().interfering_pairs(hotspots)
}
