//! Greedy channel reassignment.
//!
//! One deterministic left-to-right sweep over index pairs. For every pair
//! that interferes under the working assignment, only the second hotspot's
//! channel is varied; the first candidate (in alphabet order) that strictly
//! lowers the total interference count wins. A single sweep does not
//! necessarily reach a fixpoint: earlier commits can expose later pairs.
//! Callers that want convergence repeat the sweep until nothing changes
//! (see `optimise_until_stable`).

use crate::{
    channel::{Channel, ChannelAlphabet},
    interference::InterferenceModel,
    types::{Hotspot, HotspotId},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of one sweep.
#[derive(Debug, Clone, Serialize)]
pub struct OptimiseOutcome {
    /// Hotspots whose final channel differs from the input, by id.
    pub changes: BTreeMap<HotspotId, Channel>,
    /// The full updated assignment, same order as the input.
    pub hotspots: Vec<Hotspot>,
    /// Interference count before the sweep.
    pub before: usize,
    /// Interference count after the sweep. Never greater than `before`.
    pub after: usize,
    /// Number of committed reassignments (a hotspot can be reassigned twice).
    pub commits: usize,
}

impl OptimiseOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// For each hotspot, the indices of all other hotspots within the
/// interference radius, whatever their channel. Positions never change,
/// so this is built once per sweep.
pub struct NeighbourTable {
    neighbours: Vec<Vec<usize>>,
}

impl NeighbourTable {
    pub fn build(model: &InterferenceModel, hotspots: &[Hotspot]) -> Self {
        let mut neighbours = vec![Vec::new(); hotspots.len()];
        for i in 0..hotspots.len() {
            for j in i + 1..hotspots.len() {
                if model.in_range(&hotspots[i], &hotspots[j]) {
                    neighbours[i].push(j);
                    neighbours[j].push(i);
                }
            }
        }
        Self { neighbours }
    }

    pub fn neighbours_of(&self, index: usize) -> &[usize] {
        &self.neighbours[index]
    }

    /// How many in-range neighbours of `index` would share a band with
    /// `channel`. This is exactly the number of interfering pairs that
    /// involve `index` if it were on `channel`.
    pub fn conflicts_on(&self, hotspots: &[Hotspot], index: usize, channel: &Channel) -> usize {
        self.neighbours[index]
            .iter()
            .filter(|&&k| hotspots[k].channel.shares_band_with(channel))
            .count()
    }
}

/// Run one greedy sweep and return the changed channels plus the updated
/// assignment. Coordinates and ids are never touched.
///
/// Scoring: a trial of channel `c` on hotspot `j` is worth
/// `total - conflicts(j, current) + conflicts(j, c)`, which is the same
/// number a full recount of the assignment would give, so decisions and
/// tie-breaks are identical to recounting. Recounting everything for every
/// candidate costs O(n³·|alphabet|) in the worst case; with the neighbour
/// table the sweep is O(n²) to build plus O(pairs·|alphabet|·degree).
pub fn optimise(
    model: &InterferenceModel,
    hotspots: &[Hotspot],
    alphabet: &ChannelAlphabet,
) -> OptimiseOutcome {
    let mut working: Vec<Hotspot> = hotspots.to_vec();
    let table = NeighbourTable::build(model, &working);
    let before = model.count_interference(&working);
    let mut baseline = before;
    let mut commits = 0;

    for i in 0..working.len() {
        for j in i + 1..working.len() {
            if !model.interferes(&working[i], &working[j]) {
                continue;
            }

            let current = working[j].channel.clone();
            let without_j = baseline - table.conflicts_on(&working, j, &current);
            let mut best: Option<Channel> = None;
            let mut lowest = baseline;

            for candidate in alphabet.channels() {
                if candidate == current {
                    continue;
                }
                let trial = without_j + table.conflicts_on(&working, j, &candidate);
                if trial < lowest {
                    lowest = trial;
                    best = Some(candidate);
                }
            }

            if let Some(channel) = best {
                log::debug!(
                    "pair ({i}, {j}): hotspot {} {} -> {} (interference {} -> {})",
                    working[j].id,
                    current,
                    channel,
                    baseline,
                    lowest
                );
                working[j].channel = channel;
                baseline = lowest;
                commits += 1;
            }
        }
    }

    let changes: BTreeMap<HotspotId, Channel> = hotspots
        .iter()
        .zip(&working)
        .filter(|(old, new)| old.channel != new.channel)
        .map(|(_, new)| (new.id, new.channel.clone()))
        .collect();

    log::info!(
        "sweep over {} hotspots: interference {} -> {}, {} hotspots changed",
        working.len(),
        before,
        baseline,
        changes.len()
    );

    OptimiseOutcome {
        changes,
        hotspots: working,
        before,
        after: baseline,
        commits,
    }
}

/// Repeat `optimise` on its own output until a sweep changes nothing or
/// `max_passes` sweeps have run. Returns every pass in order.
pub fn optimise_until_stable(
    model: &InterferenceModel,
    hotspots: &[Hotspot],
    alphabet: &ChannelAlphabet,
    max_passes: usize,
) -> Vec<OptimiseOutcome> {
    let mut passes: Vec<OptimiseOutcome> = Vec::new();
    let mut current = hotspots.to_vec();
    for _ in 0..max_passes {
        let outcome = optimise(model, &current, alphabet);
        let done = outcome.is_unchanged();
        current = outcome.hotspots.clone();
        passes.push(outcome);
        if done {
            break;
        }
    }
    passes
}
