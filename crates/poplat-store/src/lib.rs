//! Dual-indexed occupant storage for poplat simulations.
//!
//! Every live occupant is reachable from two independent indexes: its
//! species' global member list and its site's per-species list. Both
//! support O(1) insertion and O(1) swap-remove, and every occupant carries
//! back-references (`species_index`, `site_index`) to its position in each.
//!
//! # Architecture
//!
//! ```text
//! Population
//! ├── slots: Vec<OccupantSlot>          (arena, recycled via free list)
//! ├── species: IndexMap<name, members>  (SpeciesId = map index)
//! └── sites: Vec<SiteOccupancy>         (per-site, per-species key lists)
//! ```
//!
//! Occupants are addressed by [`OccupantKey`], a `(slot, generation)`
//! handle. Destroying an occupant bumps its slot generation, so every
//! outstanding key to it becomes detectably stale.
//!
//! # Checked indexes
//!
//! With [`IndexChecks::Checked`] (the default) every mutation verifies that
//! the key is live and that both back-references locate it. With
//! [`IndexChecks::Unchecked`] those checks are skipped in release builds;
//! passing a stale key is then unspecified behaviour (memory-safe, but it
//! may detach an unrelated occupant or panic).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod checks;
pub mod key;
pub mod population;

pub use checks::IndexChecks;
pub use key::{OccupantKey, OccupantRef};
pub use population::Population;
