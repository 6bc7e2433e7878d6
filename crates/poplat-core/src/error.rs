//! Error types shared across the poplat workspace.
//!
//! Organised by subsystem: the population store (index maintenance) and
//! the stochastic engine (iteration and stepping). Configuration errors
//! live next to the configuration they validate, in `poplat-engine`.

use std::error::Error;
use std::fmt;

use crate::id::{OccupantId, SiteId, SpeciesId};

/// Errors from population store operations.
///
/// `UnknownSpecies` and `UnknownSite` are always checked. `StaleOccupant`
/// and `IndexCorrupted` are only detected when the store runs with
/// checked indexes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A species with this name is already registered.
    DuplicateSpecies {
        /// The offending name.
        name: String,
    },
    /// The species ID does not belong to this store.
    UnknownSpecies {
        /// The unrecognised species.
        species: SpeciesId,
    },
    /// The site ID is outside the store's site range.
    UnknownSite {
        /// The unrecognised site.
        site: SiteId,
        /// Number of sites in the store.
        site_count: usize,
    },
    /// An occupant key refers to an occupant that has been destroyed
    /// (or to a slot that was never allocated).
    StaleOccupant {
        /// Arena slot encoded in the key.
        slot: u32,
        /// Generation encoded in the key.
        generation: u32,
    },
    /// A back-reference stored on an occupant does not locate that
    /// occupant in the named list.
    IndexCorrupted {
        /// The occupant whose back-reference is wrong.
        occupant: OccupantId,
        /// Which list failed (`"species"` or `"site"`).
        list: &'static str,
        /// The stored position that failed to resolve.
        position: usize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSpecies { name } => {
                write!(f, "species '{name}' is already registered")
            }
            Self::UnknownSpecies { species } => write!(f, "unknown species {species}"),
            Self::UnknownSite { site, site_count } => {
                write!(f, "site {site} out of range (store has {site_count} sites)")
            }
            Self::StaleOccupant { slot, generation } => {
                write!(f, "stale occupant key: slot {slot}, generation {generation}")
            }
            Self::IndexCorrupted {
                occupant,
                list,
                position,
            } => write!(
                f,
                "occupant {occupant} not found at position {position} of its {list} list"
            ),
        }
    }
}

impl Error for StoreError {}

/// Errors from the stochastic engine during `iteration()` and `step()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// No live occupants remain, so no trigger can be selected.
    EmptyPopulation,
    /// The selection index did not land on a live occupant: the species
    /// counts do not add up to the population total.
    SelectionOutOfRange {
        /// The drawn global index.
        index: usize,
        /// The population total it was drawn against.
        total: usize,
    },
    /// A store operation failed while applying a movement or reaction.
    Store(StoreError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPopulation => write!(f, "population is empty, nothing to select"),
            Self::SelectionOutOfRange { index, total } => write!(
                f,
                "selection index {index} matched no occupant (population total {total})"
            ),
            Self::Store(e) => write!(f, "store: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::EmptyPopulation | Self::SelectionOutOfRange { .. } => None,
        }
    }
}

impl From<StoreError> for StepError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::UnknownSite {
            site: SiteId(12),
            site_count: 4,
        };
        assert_eq!(err.to_string(), "site 12 out of range (store has 4 sites)");

        let err = StoreError::IndexCorrupted {
            occupant: OccupantId(5),
            list: "site",
            position: 3,
        };
        assert!(err.to_string().contains("site list"));
    }

    #[test]
    fn step_error_wraps_store_error() {
        let inner = StoreError::StaleOccupant {
            slot: 1,
            generation: 2,
        };
        let err: StepError = inner.clone().into();
        assert_eq!(err, StepError::Store(inner));
        assert!(err.source().is_some());
        assert!(StepError::EmptyPopulation.source().is_none());
    }

    #[test]
    fn selection_out_of_range_display() {
        let err = StepError::SelectionOutOfRange { index: 7, total: 5 };
        assert_eq!(
            err.to_string(),
            "selection index 7 matched no occupant (population total 5)"
        );
        assert!(err.source().is_none());
        assert_ne!(err, StepError::EmptyPopulation);
    }
}
