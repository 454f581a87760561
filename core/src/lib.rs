//! Hotspot channel planning: constrained placement, co-channel
//! interference scoring and a greedy channel reassignment sweep, with a
//! SQLite snapshot ledger and an SVG plot sink around them.

pub mod channel;
pub mod config;
pub mod error;
pub mod event;
pub mod interference;
pub mod optimiser;
pub mod placement;
pub mod planner;
pub mod render;
pub mod rng;
pub mod spatial_index;
pub mod store;
pub mod types;
