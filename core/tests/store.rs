//! Base records, the versioned snapshot ledger and the event log.

use hotspot_core::{
    channel::{Channel, ChannelAlphabet},
    error::PlanError,
    event::{EventLogEntry, PlanEvent},
    store::HotspotStore,
    types::{assignment_of, Assignment, Hotspot},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn fresh_store() -> HotspotStore {
    let store = HotspotStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn seed_three(store: &HotspotStore) -> Vec<Hotspot> {
    store
        .insert_placement(&[
            Hotspot::new(1, 10, 20, Channel::known("A")),
            Hotspot::new(2, 30, 40, Channel::known("B")),
            Hotspot::new(3, 50, 60, Channel::known("C")),
        ])
        .expect("insert placement")
}

fn with_channel(hotspots: &[Hotspot], index: usize, symbol: &str) -> Assignment {
    let mut assignment = assignment_of(hotspots);
    assignment.insert(hotspots[index].id, Channel::known(symbol));
    assignment
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn migrate_is_idempotent() {
    let store = fresh_store();
    store.migrate().expect("second migration");
    assert_eq!(store.hotspot_count().unwrap(), 0);
}

#[test]
fn base_records_load_back_in_id_order() {
    let store = fresh_store();
    let stored = seed_three(&store);
    assert_eq!(stored.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2, 3]);

    let loaded = store.load_hotspots(&ChannelAlphabet::default()).unwrap();
    assert_eq!(loaded, stored);
    assert_eq!(store.hotspot_count().unwrap(), 3);
    assert_eq!(store.latest_snapshot_version().unwrap(), None);
    assert!(store.snapshot_versions().unwrap().is_empty());
    assert_eq!(store.latest_assignment_name().unwrap(), "channel");
}

#[test]
fn snapshots_are_versioned_and_latest_wins() {
    let store = fresh_store();
    let stored = seed_three(&store);

    let v1 = store.write_snapshot(&with_channel(&stored, 0, "E"), 4, 2).unwrap();
    let v2 = store.write_snapshot(&with_channel(&stored, 1, "D"), 2, 1).unwrap();
    assert_eq!((v1, v2), (1, 2));
    assert_eq!(store.snapshot_versions().unwrap(), vec![1, 2]);
    assert_eq!(store.latest_snapshot_version().unwrap(), Some(2));
    assert_eq!(store.latest_assignment_name().unwrap(), "iteration_2");

    let loaded = store.load_hotspots(&ChannelAlphabet::default()).unwrap();
    let channels: Vec<String> = loaded.iter().map(|h| h.channel.to_string()).collect();
    assert_eq!(channels, vec!["A", "D", "C"], "version 2 does not carry version 1's edit");

    let first = store.read_snapshot(1).unwrap();
    assert_eq!(first.name, "iteration_1");
    assert_eq!((first.before, first.after), (4, 2));
    assert_eq!(first.assignment[&1], "E");
    assert_eq!(first.assignment[&2], "B");
    assert_eq!(first.assignment.len(), 3);
}

#[test]
fn missing_snapshot_is_a_typed_error() {
    let store = fresh_store();
    seed_three(&store);
    assert!(matches!(
        store.read_snapshot(99),
        Err(PlanError::SnapshotNotFound { version: 99 })
    ));
}

#[test]
fn hotspots_missing_from_latest_snapshot_keep_base_channel() {
    let store = fresh_store();
    let stored = seed_three(&store);
    let mut partial = Assignment::new();
    partial.insert(stored[2].id, Channel::known("A"));
    store.write_snapshot(&partial, 0, 0).unwrap();

    let loaded = store.load_hotspots(&ChannelAlphabet::default()).unwrap();
    let channels: Vec<String> = loaded.iter().map(|h| h.channel.to_string()).collect();
    assert_eq!(channels, vec!["A", "B", "A"]);
}

#[test]
fn unknown_stored_channel_loads_as_unrecognised() {
    let store = fresh_store();
    store
        .insert_placement(&[
            Hotspot::new(1, 0, 0, Channel::Unrecognised("Q".into())),
            Hotspot::new(2, 10, 0, Channel::known("A")),
        ])
        .unwrap();

    let loaded = store.load_hotspots(&ChannelAlphabet::default()).unwrap();
    assert_eq!(loaded[0].channel, Channel::Unrecognised("Q".into()));
    assert_eq!(loaded[1].channel, Channel::known("A"));
}

#[test]
fn snapshot_for_unknown_hotspot_is_rejected() {
    let store = fresh_store();
    seed_three(&store);
    let mut bogus = Assignment::new();
    bogus.insert(404, Channel::known("A"));
    assert!(matches!(
        store.write_snapshot(&bogus, 0, 0),
        Err(PlanError::Database(_))
    ));
    assert!(store.snapshot_versions().unwrap().is_empty(), "failed write must roll back");
}

#[test]
fn event_log_round_trips_payloads() {
    let store = fresh_store();
    let event = PlanEvent::SweepWithoutChanges { interference: 12 };
    store
        .append_event(&EventLogEntry::from_event(&event).unwrap())
        .unwrap();

    let entries = store.events().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event_type, "sweep_without_changes");
    assert_eq!(entries[0].decode().unwrap(), event);
}
