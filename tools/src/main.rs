//! hotspot-runner: headless driver for the hotspot channel planner.
//!
//! Usage:
//!   hotspot-runner generate --seed 12345 --count 1000 --db hotspots.db
//!   hotspot-runner optimise --db hotspots.db [--until-stable]
//!   hotspot-runner plot     --db hotspots.db --out-dir plots
//!   hotspot-runner run      --seed 12345 --db hotspots.db --out-dir plots
//!
//! `--config plan.json` loads a PlanConfig; flags override its values.

use anyhow::{bail, Result};
use hotspot_core::{
    config::PlanConfig,
    planner::{OptimiseReport, Planner},
    render::SvgPlot,
    store::HotspotStore,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args
        .get(1)
        .map(String::as_str)
        .filter(|a| !a.starts_with("--"))
        .unwrap_or("run");

    let mut config = match find_arg(&args, "--config") {
        Some(path) => PlanConfig::load(path)?,
        None => PlanConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.target_count = parse_arg(&args, "--count", config.target_count);
    config.min_distance = parse_arg(&args, "--min-distance", config.min_distance);
    config.max_passes = parse_arg(&args, "--max-passes", config.max_passes);
    let until_stable = args.iter().any(|a| a == "--until-stable");
    let db = find_arg(&args, "--db").unwrap_or("hotspots.db");
    let out_dir = find_arg(&args, "--out-dir").unwrap_or(".");

    let store = HotspotStore::open(db)?;
    store.migrate()?;
    let planner = Planner::new(store, config)?;

    match command {
        "generate" => generate(&planner, db)?,
        "optimise" | "optimize" => optimise(&planner, until_stable)?,
        "plot" => plot(&planner, out_dir)?,
        "run" => {
            if planner.store.hotspot_count()? == 0 {
                generate(&planner, db)?;
            }
            optimise(&planner, until_stable)?;
            plot(&planner, out_dir)?;
        }
        other => bail!("unknown command '{other}' (expected generate, optimise, plot or run)"),
    }
    Ok(())
}

fn generate(planner: &Planner, db: &str) -> Result<()> {
    let existing = planner.store.hotspot_count()?;
    if existing > 0 {
        log::warn!("{db} already holds {existing} hotspots; appending a new placement");
    }
    let placed = planner.generate()?;
    let config = planner.config();
    println!("Hotspot placement");
    println!("  seed:          {}", config.seed);
    println!("  hotspots:      {}", placed.len());
    println!("  min distance:  {}", config.min_distance);
    println!("  interference:  {}", planner.model().count_interference(&placed));
    Ok(())
}

fn optimise(planner: &Planner, until_stable: bool) -> Result<()> {
    let reports = if until_stable {
        planner.optimise_until_stable()?
    } else {
        vec![planner.optimise_once()?]
    };
    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &OptimiseReport) {
    println!("Previous Interference Count: {}", report.before);
    match report.version {
        None => println!(
            "No updates made. Network already optimised or no further improvements possible."
        ),
        Some(version) => {
            println!("Stored full channel state in snapshot iteration_{version}");
            println!("  changed hotspots: {}", report.changes.len());
            println!("New Interference Count: {}", report.after);
        }
    }
}

fn plot(planner: &Planner, out_dir: &str) -> Result<()> {
    let mut sink = SvgPlot::new(out_dir);
    let frame = planner.plot(&mut sink)?;
    println!(
        "Plotted {} hotspots, {} interfering pairs -> {}",
        frame.points.len(),
        frame.pairs.len(),
        sink.artifact_path(&frame).display()
    );
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
