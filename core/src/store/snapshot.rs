use super::{snapshot_name, HotspotStore};
use crate::{
    error::{PlanError, PlanResult},
    types::{Assignment, HotspotId, SnapshotVersion},
};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub version:    SnapshotVersion,
    pub name:       String,
    pub before:     usize,
    pub after:      usize,
    /// Raw stored symbols, by hotspot id.
    pub assignment: BTreeMap<HotspotId, String>,
}

impl HotspotStore {
    // ── Snapshot ledger ────────────────────────────────────────

    /// All versions, ascending.
    pub fn snapshot_versions(&self) -> PlanResult<Vec<SnapshotVersion>> {
        let mut stmt = self
            .conn
            .prepare("SELECT version FROM snapshot ORDER BY version ASC")?;
        let versions = stmt
            .query_map([], |row| row.get::<_, SnapshotVersion>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(versions)
    }

    pub fn latest_snapshot_version(&self) -> PlanResult<Option<SnapshotVersion>> {
        let latest: Option<SnapshotVersion> = self
            .conn
            .query_row("SELECT MAX(version) FROM snapshot", [], |row| row.get(0))?;
        Ok(latest)
    }

    pub fn read_snapshot(&self, version: SnapshotVersion) -> PlanResult<SnapshotRecord> {
        let header: Option<(String, i64, i64)> = self
            .conn
            .query_row(
                "SELECT name, interference_before, interference_after
                 FROM snapshot WHERE version = ?1",
                params![version],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        let (name, before, after) = header.ok_or(PlanError::SnapshotNotFound { version })?;

        let mut stmt = self.conn.prepare(
            "SELECT hotspot_id, channel FROM snapshot_channel
             WHERE version = ?1 ORDER BY hotspot_id ASC",
        )?;
        let assignment = stmt
            .query_map(params![version], |row| {
                Ok((row.get::<_, HotspotId>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(SnapshotRecord {
            version,
            name,
            before: before as usize,
            after: after as usize,
            assignment,
        })
    }

    /// Append a new version holding the full assignment. Earlier versions
    /// are never touched. Returns the new version number.
    pub fn write_snapshot(
        &self,
        assignment: &Assignment,
        before: usize,
        after: usize,
    ) -> PlanResult<SnapshotVersion> {
        let tx = self.conn.unchecked_transaction()?;
        let version: SnapshotVersion = tx.query_row(
            "SELECT COALESCE(MAX(version), 0) + 1 FROM snapshot",
            [],
            |row| row.get(0),
        )?;
        let name = snapshot_name(version);
        tx.execute(
            "INSERT INTO snapshot (version, name, interference_before, interference_after)
             VALUES (?1, ?2, ?3, ?4)",
            params![version, name, before as i64, after as i64],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO snapshot_channel (version, hotspot_id, channel) VALUES (?1, ?2, ?3)",
            )?;
            for (id, channel) in assignment {
                stmt.execute(params![version, id, channel.symbol()])?;
            }
        }
        tx.commit()?;
        log::info!("Stored full channel state as snapshot '{name}'");
        Ok(version)
    }

    /// Name of the latest snapshot, or the base column name when none exists.
    pub fn latest_assignment_name(&self) -> PlanResult<String> {
        Ok(self
            .latest_snapshot_version()?
            .map(snapshot_name)
            .unwrap_or_else(|| super::BASE_ASSIGNMENT_NAME.to_string()))
    }
}
