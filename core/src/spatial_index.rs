//! Proximity index over placed points.
//!
//! Only two operations are needed: insert a point, and ask whether any
//! already inserted point lies within a radius (inclusive) of a query point.

use crate::types::{distance, Coord};
use std::collections::HashMap;

pub type Point = (Coord, Coord);

pub trait SpatialIndex {
    fn insert(&mut self, point: Point);

    /// True if any inserted point is at Euclidean distance `<= radius`.
    fn any_within(&self, point: Point, radius: f64) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Uniform bucket grid. Each point lands in the cell
/// `(floor(x / cell_size), floor(y / cell_size))`; a query only visits the
/// cells overlapping the query's bounding square.
pub struct GridIndex {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<Point>>,
    count: usize,
}

impl GridIndex {
    /// `cell_size` should be close to the radius most queries use.
    /// Non-positive or non-finite sizes fall back to 1.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        Self { cell_size, cells: HashMap::new(), count: 0 }
    }

    fn cell_of(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (x / self.cell_size).floor() as i64,
            (y / self.cell_size).floor() as i64,
        )
    }
}

impl SpatialIndex for GridIndex {
    fn insert(&mut self, point: Point) {
        let cell = self.cell_of(point.0 as f64, point.1 as f64);
        self.cells.entry(cell).or_default().push(point);
        self.count += 1;
    }

    fn any_within(&self, point: Point, radius: f64) -> bool {
        if self.count == 0 || radius < 0.0 {
            return false;
        }
        let (px, py) = (point.0 as f64, point.1 as f64);
        let (c_lo, r_lo) = self.cell_of(px - radius, py - radius);
        let (c_hi, r_hi) = self.cell_of(px + radius, py + radius);

        // Scan the buckets directly when the query square spans more cells than are occupied.
        let cols = c_hi.saturating_sub(c_lo).saturating_add(1);
        let rows = r_hi.saturating_sub(r_lo).saturating_add(1);
        if cols.saturating_mul(rows) as u64 > self.cells.len() as u64 {
            return self
                .cells
                .values()
                .flatten()
                .any(|&q| distance(point, q) <= radius);
        }

        for row in r_lo..=r_hi {
            for col in c_lo..=c_hi {
                if let Some(bucket) = self.cells.get(&(col, row)) {
                    if bucket.iter().any(|&q| distance(point, q) <= radius) {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn len(&self) -> usize {
        self.count
    }
}

/// Brute-force index: scans every point. Reference for cross-checking.
#[derive(Default)]
pub struct LinearIndex {
    points: Vec<Point>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpatialIndex for LinearIndex {
    fn insert(&mut self, point: Point) {
        self.points.push(point);
    }

    fn any_within(&self, point: Point, radius: f64) -> bool {
        self.points.iter().any(|&q| distance(point, q) <= radius)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
