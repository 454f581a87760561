//! Deterministic random number generation.
//!
//! RULE: Nothing in the planner may call any platform RNG.
//! All randomness flows through a PlanRng built from an explicit seed,
//! so a placement is fully reproducible from the seed alone.

use crate::types::Coord;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG handed to whoever consumes randomness.
pub struct PlanRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl PlanRng {
    pub fn new(seed: u64) -> Self {
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll a coordinate in the inclusive range [lo, hi].
    pub fn coord_in(&mut self, lo: Coord, hi: Coord) -> Coord {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        let span = (hi - lo) as u64 + 1;
        lo + self.next_u64_below(span) as Coord
    }

    /// Pick an index into a collection of `len` items.
    pub fn index_below(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }
}
