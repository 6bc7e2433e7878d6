//! poplat: spatial stochastic population simulation on periodic lattices.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all poplat sub-crates. For most users, adding `poplat` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use poplat::prelude::*;
//!
//! // Hares breed and wander; foxes eat hares, breed on success, and die.
//! let config = WorldConfig::new(16, 16)
//!     .species("hare", vec![ReactionDef::birth(0.3)])
//!     .species(
//!         "fox",
//!         vec![
//!             ReactionDef::predation_birth("hare", 0.4),
//!             ReactionDef::death(0.2),
//!         ],
//!     )
//!     .density("hare", 2.0)
//!     .density("fox", 0.5)
//!     .movement("hare", 1.0)
//!     .movement("fox", 1.0)
//!     .with_seed(42);
//!
//! let mut world = World::new(config).unwrap();
//! let mut history = Vec::new();
//! let steps = world
//!     .run_with(3, |w| {
//!         history.push(w.abundances());
//!         std::ops::ControlFlow::Continue(())
//!     })
//!     .unwrap();
//! assert_eq!(steps, 3);
//! assert_eq!(history.len(), 3);
//! assert_eq!(world.step_count(), 3);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `poplat-core` | IDs and shared error types |
//! | [`space`] | `poplat-space` | The periodic 4-neighbour lattice |
//! | [`store`] | `poplat-store` | The dual-indexed occupant store |
//! | [`reaction`] | `poplat-reaction` | Rates, hops and reactions |
//! | [`engine`] | `poplat-engine` | World configuration and the stochastic engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core IDs and error types (`poplat-core`).
pub use poplat_core as types;

/// The periodic lattice (`poplat-space`).
///
/// [`space::Torus4`] wraps on both axes; neighbours are listed in
/// [`space::Direction`] order.
pub use poplat_space as space;

/// The occupant store (`poplat-store`).
///
/// [`store::Population`] keeps every occupant in a per-species list and a
/// per-site list, both with O(1) swap-remove.
pub use poplat_store as store;

/// Reactions (`poplat-reaction`).
pub use poplat_reaction as reaction;

/// World configuration and the stochastic engine (`poplat-engine`).
///
/// Build a [`engine::WorldConfig`], pass it to [`engine::World::new`],
/// then [`step`](engine::World::step) or [`run`](engine::World::run).
pub use poplat_engine as engine;

/// Common imports for typical poplat usage.
///
/// ```rust
/// use poplat::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use poplat_core::{OccupantId, SiteId, SpeciesId, StepId};

    // Errors
    pub use poplat_core::{StepError, StoreError};
    pub use poplat_engine::ConfigError;
    pub use poplat_reaction::ResolveError;
    pub use poplat_space::SpaceError;

    // Space
    pub use poplat_space::{Direction, Torus4};

    // Store
    pub use poplat_store::{IndexChecks, OccupantKey, OccupantRef, Population};

    // Reactions
    pub use poplat_reaction::{Fate, Hop, Rate, Reaction, ReactionDef};

    // Engine
    pub use poplat_engine::{IterationReport, OccupancyGrid, StepMetrics, World, WorldConfig};
}
