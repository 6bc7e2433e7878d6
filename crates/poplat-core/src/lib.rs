//! Core types for the poplat lattice population framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other poplat crate: strongly-typed
//! identifiers for species, sites, occupants and steps, plus the error
//! enums that cross crate boundaries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::{StepError, StoreError};
pub use id::{OccupantId, SiteId, SpeciesId, StepId};
