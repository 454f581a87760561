//! Rejection-sampling placement of hotspots with a minimum separation.

use crate::{
    channel::ChannelAlphabet,
    error::{PlanError, PlanResult},
    rng::PlanRng,
    spatial_index::{GridIndex, SpatialIndex},
    types::{DomainBounds, Hotspot, HotspotId, COORD_LIMIT},
};
use serde::{Deserialize, Serialize};

/// Floor for the default rejection budget.
pub const MIN_REJECTION_BUDGET: u64 = 10_000;

/// Default rejection budget per requested hotspot.
pub const REJECTIONS_PER_TARGET: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementParams {
    pub target_count: usize,
    pub min_distance: f64,
    pub bounds: DomainBounds,
    /// Give up after this many rejections in a row.
    /// `None` means `max(MIN_REJECTION_BUDGET, REJECTIONS_PER_TARGET * target_count)`.
    #[serde(default)]
    pub max_consecutive_rejections: Option<u64>,
}

impl PlacementParams {
    pub fn new(target_count: usize, min_distance: f64, bounds: DomainBounds) -> Self {
        Self {
            target_count,
            min_distance,
            bounds,
            max_consecutive_rejections: None,
        }
    }

    pub fn with_rejection_budget(mut self, budget: u64) -> Self {
        self.max_consecutive_rejections = Some(budget);
        self
    }

    pub fn rejection_budget(&self) -> u64 {
        self.max_consecutive_rejections.unwrap_or_else(|| {
            (self.target_count as u64)
                .saturating_mul(REJECTIONS_PER_TARGET)
                .max(MIN_REJECTION_BUDGET)
        })
    }

    pub fn validate(&self) -> PlanResult<()> {
        if self.target_count == 0 {
            return Err(PlanError::InvalidConfiguration(
                "target_count must be positive".into(),
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(PlanError::InvalidConfiguration(format!(
                "min_distance must be a positive number, got {}",
                self.min_distance
            )));
        }
        if self.bounds.exceeds_coord_limit() {
            return Err(PlanError::InvalidConfiguration(format!(
                "domain bounds {:?} exceed +/-{COORD_LIMIT}",
                self.bounds
            )));
        }
        if self.bounds.is_degenerate() {
            return Err(PlanError::InvalidConfiguration(format!(
                "domain bounds {:?} have no area",
                self.bounds
            )));
        }
        if self.max_consecutive_rejections == Some(0) {
            return Err(PlanError::InvalidConfiguration(
                "max_consecutive_rejections must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Place `target_count` hotspots so that no two are within `min_distance`.
///
/// Every attempt draws x, then y, then a channel. The channel is drawn
/// whether or not the position is accepted and is never re-rolled.
/// Accepted hotspots get provisional ids 1, 2, ... in acceptance order.
///
/// Fails with `PlacementInfeasible` after `rejection_budget()` rejections
/// in a row, which is how an over-packed domain shows up.
pub fn generate(
    params: &PlacementParams,
    alphabet: &ChannelAlphabet,
    rng: &mut PlanRng,
) -> PlanResult<Vec<Hotspot>> {
    params.validate()?;

    let budget = params.rejection_budget();
    let bounds = params.bounds;
    let mut index = GridIndex::new(params.min_distance);
    let mut hotspots: Vec<Hotspot> = Vec::with_capacity(params.target_count.min(1 << 16));
    let mut consecutive_rejections: u64 = 0;
    let mut attempts: u64 = 0;

    while hotspots.len() < params.target_count {
        let x = rng.coord_in(bounds.x_min, bounds.x_max);
        let y = rng.coord_in(bounds.y_min, bounds.y_max);
        let channel = alphabet.pick(rng);
        attempts += 1;

        if index.any_within((x, y), params.min_distance) {
            consecutive_rejections += 1;
            if consecutive_rejections >= budget {
                log::warn!(
                    "placement gave up: {} of {} placed, {} rejections in a row",
                    hotspots.len(),
                    params.target_count,
                    consecutive_rejections
                );
                return Err(PlanError::PlacementInfeasible {
                    placed: hotspots.len(),
                    target: params.target_count,
                    attempts: consecutive_rejections,
                });
            }
            continue;
        }

        consecutive_rejections = 0;
        index.insert((x, y));
        let id = hotspots.len() as HotspotId + 1;
        hotspots.push(Hotspot::new(id, x, y, channel));
    }

    log::debug!(
        "{}: placed {} hotspots in {} attempts (min_distance={})",
        rng.name,
        hotspots.len(),
        attempts,
        params.min_distance
    );
    Ok(hotspots)
}
