//! Movement of an occupant to a neighbouring site.

use poplat_core::{SiteId, StoreError};
use poplat_space::{Direction, Torus4};
use poplat_store::{OccupantKey, Population};

use crate::rate::Rate;
use crate::reaction::stale;

/// A hop to one of the four lattice neighbours.
///
/// The direction is drawn by the caller so that the engine controls the
/// order of random draws. Applying a hop always moves the occupant: the
/// rate is carried as configuration and consumes no randomness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hop {
    rate: Rate,
}

impl Hop {
    /// A hop with the given configured rate.
    pub fn new(rate: Rate) -> Self {
        Self { rate }
    }

    /// The configured rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Move `trigger` one site in `direction` and return its new site.
    ///
    /// On a 1×1 lattice the occupant lands on the site it left.
    pub fn apply(
        &self,
        population: &mut Population,
        lattice: &Torus4,
        trigger: OccupantKey,
        direction: Direction,
    ) -> Result<SiteId, StoreError> {
        let occupant = population
            .occupant(trigger)
            .ok_or_else(|| stale(trigger))?;
        if !lattice.contains(occupant.site) {
            return Err(StoreError::UnknownSite {
                site: occupant.site,
                site_count: lattice.site_count(),
            });
        }
        let target = lattice.neighbour(occupant.site, direction);
        population.relocate(trigger, target)?;
        Ok(target)
    }
}
