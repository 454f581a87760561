//! The planner: wires placement, scoring, optimisation, the store and
//! the visualization sink into the end-to-end flow.
//!
//! FLOW (each step reads only what the previous one persisted):
//!   1. generate  — place hotspots, persist base records
//!   2. load      — base records merged with the latest snapshot
//!   3. optimise  — one greedy sweep; persist a snapshot if anything changed
//!   4. re-score  — reload and count interference again
//!   5. plot      — hand the latest assignment to a RenderSink
//!
//! RULES:
//!   - All randomness comes from a PlanRng seeded from the config.
//!   - Every persisted step is recorded in the event log.

use crate::{
    channel::{Channel, ChannelAlphabet},
    config::PlanConfig,
    error::PlanResult,
    event::{EventLogEntry, PlanEvent},
    interference::InterferenceModel,
    optimiser,
    placement,
    render::{PlotFrame, RenderSink},
    rng::PlanRng,
    store::HotspotStore,
    types::{assignment_of, Hotspot, HotspotId, SnapshotVersion},
};
use std::collections::BTreeMap;

/// What one optimise step did.
#[derive(Debug, Clone)]
pub struct OptimiseReport {
    /// New snapshot version, or None when the sweep changed nothing.
    pub version: Option<SnapshotVersion>,
    pub before:  usize,
    /// Interference re-scored from the reloaded assignment.
    pub after:   usize,
    pub changes: BTreeMap<HotspotId, Channel>,
}

pub struct Planner {
    pub store: HotspotStore,
    config:    PlanConfig,
    alphabet:  ChannelAlphabet,
    model:     InterferenceModel,
}

impl Planner {
    pub fn new(store: HotspotStore, config: PlanConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self {
            alphabet: config.alphabet()?,
            model: config.model(),
            store,
            config,
        })
    }

    /// Planner over a fresh, migrated in-memory store.
    pub fn build_test(config: PlanConfig) -> PlanResult<Self> {
        let store = HotspotStore::in_memory()?;
        store.migrate()?;
        Self::new(store, config)
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &ChannelAlphabet {
        &self.alphabet
    }

    pub fn model(&self) -> &InterferenceModel {
        &self.model
    }

    /// Place hotspots from the configured seed and persist them.
    pub fn generate(&self) -> PlanResult<Vec<Hotspot>> {
        let mut rng = PlanRng::new(self.config.seed).with_name("placement");
        let placed = placement::generate(&self.config.placement_params(), &self.alphabet, &mut rng)?;
        let stored = self.store.insert_placement(&placed)?;
        self.record(&PlanEvent::PlacementGenerated {
            seed:         self.config.seed,
            count:        stored.len(),
            min_distance: self.config.min_distance,
        })?;
        Ok(stored)
    }

    /// Current assignment: base records with the latest snapshot applied.
    pub fn load(&self) -> PlanResult<Vec<Hotspot>> {
        self.store.load_hotspots(&self.alphabet)
    }

    pub fn interference(&self) -> PlanResult<usize> {
        Ok(self.model.count_interference(&self.load()?))
    }

    /// One sweep over the latest assignment. A snapshot is written only
    /// when the sweep changed at least one channel.
    pub fn optimise_once(&self) -> PlanResult<OptimiseReport> {
        let hotspots = self.load()?;
        let outcome = optimiser::optimise(&self.model, &hotspots, &self.alphabet);
        log::info!("Previous Interference Count: {}", outcome.before);

        if outcome.is_unchanged() {
            log::info!("No updates made; network already optimised or no further improvement possible");
            self.record(&PlanEvent::SweepWithoutChanges { interference: outcome.before })?;
            return Ok(OptimiseReport {
                version: None,
                before:  outcome.before,
                after:   outcome.before,
                changes: outcome.changes,
            });
        }

        let version = self.store.write_snapshot(
            &assignment_of(&outcome.hotspots),
            outcome.before,
            outcome.after,
        )?;
        let after = self.interference()?;
        debug_assert_eq!(after, outcome.after, "reloaded assignment must score like the sweep");
        log::info!("New Interference Count: {after}");

        self.record(&PlanEvent::SnapshotWritten {
            version,
            name:    crate::store::snapshot_name(version),
            changed: outcome.changes.len(),
            before:  outcome.before,
            after,
        })?;
        Ok(OptimiseReport {
            version: Some(version),
            before: outcome.before,
            after,
            changes: outcome.changes,
        })
    }

    /// Repeat `optimise_once` until a sweep changes nothing or the
    /// configured number of passes is used up.
    pub fn optimise_until_stable(&self) -> PlanResult<Vec<OptimiseReport>> {
        let mut reports = Vec::new();
        for _ in 0..self.config.max_passes {
            let report = self.optimise_once()?;
            let done = report.version.is_none();
            reports.push(report);
            if done {
                break;
            }
        }
        Ok(reports)
    }

    /// Render the latest assignment to `sink`.
    pub fn plot(&self, sink: &mut dyn RenderSink) -> PlanResult<PlotFrame> {
        let hotspots = self.load()?;
        let name = self.store.latest_assignment_name()?;
        let frame = PlotFrame::build(&name, self.config.bounds, &hotspots, &self.model);
        sink.render(&frame)?;
        self.record(&PlanEvent::PlotRendered {
            name,
            interfering_pairs: frame.pairs.len(),
        })?;
        Ok(frame)
    }

    fn record(&self, event: &PlanEvent) -> PlanResult<()> {
        let entry = EventLogEntry::from_event(event)?;
        self.store.append_event(&entry)?;
        log::debug!("event recorded: {}", entry.event_type);
        Ok(())
    }
}
