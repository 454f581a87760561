//! Planner events, persisted to the event log as JSON payloads.
//!
//! Variants are only ever appended; the stored `event_type` string is part
//! of the on-disk format.

use crate::types::SnapshotVersion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanEvent {
    PlacementGenerated {
        seed: u64,
        count: usize,
        min_distance: f64,
    },
    SnapshotWritten {
        version: SnapshotVersion,
        name: String,
        changed: usize,
        before: usize,
        after: usize,
    },
    SweepWithoutChanges {
        interference: usize,
    },
    PlotRendered {
        name: String,
        interfering_pairs: usize,
    },
}

impl PlanEvent {
    /// Stable name for the event_type column.
    pub fn event_type(&self) -> &'static str {
        match self {
            PlanEvent::PlacementGenerated { .. }  => "placement_generated",
            PlanEvent::SnapshotWritten { .. }     => "snapshot_written",
            PlanEvent::SweepWithoutChanges { .. } => "sweep_without_changes",
            PlanEvent::PlotRendered { .. }        => "plot_rendered",
        }
    }
}

/// A row in the event_log table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub event_type: String,
    pub payload:    String,
}

impl EventLogEntry {
    pub fn from_event(event: &PlanEvent) -> serde_json::Result<Self> {
        Ok(Self {
            id:         None,
            event_type: event.event_type().to_string(),
            payload:    serde_json::to_string(event)?,
        })
    }

    pub fn decode(&self) -> serde_json::Result<PlanEvent> {
        serde_json::from_str(&self.payload)
    }
}
