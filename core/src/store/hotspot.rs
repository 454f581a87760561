use super::HotspotStore;
use crate::{
    channel::ChannelAlphabet,
    error::PlanResult,
    types::{Hotspot, HotspotId},
};
use rusqlite::params;

impl HotspotStore {
    // ── Base records ───────────────────────────────────────────

    /// Persist a placement as base records. Ids are generated by SQLite;
    /// the returned hotspots carry the stored ids, in input order.
    pub fn insert_placement(&self, hotspots: &[Hotspot]) -> PlanResult<Vec<Hotspot>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut stored = Vec::with_capacity(hotspots.len());
        {
            let mut stmt =
                tx.prepare("INSERT INTO hotspot (x, y, channel) VALUES (?1, ?2, ?3)")?;
            for h in hotspots {
                stmt.execute(params![h.x, h.y, h.channel.symbol()])?;
                let id: HotspotId = tx.last_insert_rowid();
                stored.push(Hotspot::new(id, h.x, h.y, h.channel.clone()));
            }
        }
        tx.commit()?;
        log::info!("{} hotspots written to database", stored.len());
        Ok(stored)
    }

    pub fn hotspot_count(&self) -> PlanResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM hotspot", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Base records in id order, each carrying the channel from the latest
    /// snapshot, or its base channel if no snapshot covers it. Stored
    /// symbols outside `alphabet` load as unrecognised channels.
    pub fn load_hotspots(&self, alphabet: &ChannelAlphabet) -> PlanResult<Vec<Hotspot>> {
        let latest = self.latest_snapshot_version()?;
        let mut stmt = self.conn.prepare(
            "SELECT h.id, h.x, h.y, COALESCE(sc.channel, h.channel)
             FROM hotspot h
             LEFT JOIN snapshot_channel sc
                    ON sc.hotspot_id = h.id AND sc.version = ?1
             ORDER BY h.id ASC",
        )?;
        let rows = stmt.query_map(params![latest], |row| {
            Ok((
                row.get::<_, HotspotId>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut hotspots = Vec::new();
        for row in rows {
            let (id, x, y, symbol) = row?;
            hotspots.push(Hotspot::new(id, x, y, alphabet.resolve(&symbol)));
        }
        Ok(hotspots)
    }
}
