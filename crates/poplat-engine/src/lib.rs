//! Stochastic engine for poplat lattice populations.
//!
//! A [`World`] owns the lattice, the population store, the per-species
//! movement and reaction rules, and a single seeded random stream. Each
//! [iteration](World::iteration) selects one live occupant with
//! probability proportional to its species' share of the population,
//! applies its hop (if any), then its reactions in order until one
//! destroys it. A [step](World::step) is as many iterations as there
//! were occupants when it began.
//!
//! Worlds are built from a [`WorldConfig`], validated up front.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod grid;
pub mod metrics;
pub mod world;

pub use config::{ConfigError, WorldConfig};
pub use grid::OccupancyGrid;
pub use metrics::{IterationReport, StepMetrics};
pub use world::World;
