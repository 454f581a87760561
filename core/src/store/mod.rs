//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The planner calls store methods; core algorithms never see SQL.
//!
//! Tables: `hotspot` (base records), `snapshot` + `snapshot_channel`
//! (append-only versioned channel assignments) and `event_log`.

use crate::{error::PlanResult, event::EventLogEntry};
use rusqlite::{params, Connection};

mod hotspot;
mod snapshot;

pub use snapshot::SnapshotRecord;

/// Snapshot name for a ledger version.
pub fn snapshot_name(version: crate::types::SnapshotVersion) -> String {
    format!("iteration_{version}")
}

/// Plot name used before any snapshot exists.
pub const BASE_ASSIGNMENT_NAME: &str = "channel";

pub struct HotspotStore {
    conn: Connection,
}

impl HotspotStore {
    /// Open (or create) the hotspot database at `path`.
    pub fn open(path: &str) -> PlanResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PlanResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order. Safe to call repeatedly.
    pub fn migrate(&self) -> PlanResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_hotspots.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_snapshots.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_event_log.sql"))?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> PlanResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (event_type, payload) VALUES (?1, ?2)",
            params![entry.event_type, entry.payload],
        )?;
        Ok(())
    }

    pub fn events(&self) -> PlanResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_type, payload FROM event_log ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map([], |row| {
                Ok(EventLogEntry {
                    id:         Some(row.get(0)?),
                    event_type: row.get(1)?,
                    payload:    row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
