//! Deterministic k-means++ clustering.
//!
//! Points are loaded from two keyed tables, joined row-by-row on their shared
//! key, seeded with k-means++ sampling from a fixed-seed generator, and then
//! refined with Lloyd's algorithm until the centers stop moving.
//!
//! ## Core Types
//!
//! - [`Dataset`] — Validated, row-aligned collection of [`Point`]s
//! - [`Params`] — Cluster count, iteration cap, convergence threshold, seed
//! - [`KMeans`] — Orchestrates [`Seeding`] and [`Lloyd`] refinement
//! - [`Outcome`] — Final centers plus per-iteration history
//!
//! ## Loading
//!
//! - [`Table`] — A keyed, comma-delimited feature table
//! - [`join()`] — Inner join of two tables into a [`Dataset`]
pub mod clustering;
pub mod loading;

#[cfg(feature = "cli")]
pub mod cli;

pub use clustering::*;
pub use loading::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// A single coordinate of a point or center.
pub type Coordinate = f64;
/// Distances, displacements, inertia and convergence thresholds.
pub type Energy = f64;

// ============================================================================
// K-MEANS PARAMETERS
// ============================================================================
/// Seed for the k-means++ generator. Fixed so that runs are reproducible.
pub const SEED: u64 = 0;
/// Default Lloyd iteration cap when none is given.
pub const KMEANS_DEFAULT_ITERATIONS: usize = 300;
/// Iteration caps must lie strictly between these bounds.
pub const KMEANS_MIN_ITERATIONS: usize = 1;
pub const KMEANS_MAX_ITERATIONS: usize = 1000;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging on stderr so that stdout carries only results.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
