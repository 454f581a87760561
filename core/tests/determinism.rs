//! Same seed, same operations: placements, sweeps and snapshot ledgers
//! must be bit-identical across runs.

use hotspot_core::{
    channel::ChannelAlphabet,
    config::PlanConfig,
    interference::InterferenceModel,
    optimiser::optimise,
    placement::{generate, PlacementParams},
    planner::Planner,
    rng::PlanRng,
    types::{DomainBounds, Hotspot},
};

fn place(seed: u64) -> Vec<Hotspot> {
    let params = PlacementParams::new(200, 50.0, DomainBounds::square(1, 2500));
    generate(&params, &ChannelAlphabet::default(), &mut PlanRng::new(seed)).expect("placement")
}

fn ledger(seed: u64) -> Vec<String> {
    let config = PlanConfig { seed, ..PlanConfig::default_test() };
    let planner = Planner::build_test(config).expect("planner");
    planner.generate().expect("generate");
    planner.optimise_until_stable().expect("optimise");

    let mut rows = Vec::new();
    for version in planner.store.snapshot_versions().expect("versions") {
        let snapshot = planner.store.read_snapshot(version).expect("snapshot");
        rows.push(serde_json::to_string(&snapshot).expect("json"));
    }
    rows.extend(planner.store.events().expect("events").into_iter().map(|e| e.payload));
    rows
}

#[test]
fn same_seed_produces_identical_placement_and_sweep() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;
    let model = InterferenceModel::default();
    let alphabet = ChannelAlphabet::default();

    let a = place(SEED);
    let b = place(SEED);
    assert_eq!(a, b, "placements diverged");

    let sweep_a = optimise(&model, &a, &alphabet);
    let sweep_b = optimise(&model, &b, &alphabet);
    assert_eq!(sweep_a.changes, sweep_b.changes);
    assert_eq!(sweep_a.hotspots, sweep_b.hotspots);
    assert_eq!(
        serde_json::to_string(&sweep_a).unwrap(),
        serde_json::to_string(&sweep_b).unwrap()
    );
}

#[test]
fn same_seed_produces_identical_ledgers() {
    let a = ledger(42);
    let b = ledger(42);
    assert_eq!(a.len(), b.len(), "ledger lengths differ: {} vs {}", a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(&b).enumerate() {
        assert_eq!(x, y, "ledger diverged at entry {i}:\n  A: {x}\n  B: {y}");
    }
}

#[test]
fn different_seeds_produce_different_placements() {
    assert_ne!(place(42), place(99), "seed is not being used");
}
