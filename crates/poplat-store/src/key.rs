//! Occupant handles and read-only occupant views.

use std::fmt;

use poplat_core::{OccupantId, SiteId, SpeciesId};

/// Handle to an occupant slot in a [`Population`](crate::Population).
///
/// The `generation` allows O(1) staleness checks: a slot's generation is
/// bumped when its occupant is destroyed, so a key held across a
/// destruction no longer matches. Keys are only meaningful for the store
/// that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccupantKey {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl OccupantKey {
    /// Arena slot this key points into.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Generation of the slot when the key was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for OccupantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OccupantKey(slot={}, gen={})", self.slot, self.generation)
    }
}

/// Snapshot of a live occupant's attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OccupantRef {
    /// Store-unique identity.
    pub id: OccupantId,
    /// Owning species.
    pub species: SpeciesId,
    /// Current site.
    pub site: SiteId,
    /// Position in the species' member list.
    pub species_index: usize,
    /// Position in the site's list for this species.
    pub site_index: usize,
}
