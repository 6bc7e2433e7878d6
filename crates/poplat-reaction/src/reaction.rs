//! Population reactions and their application to the store.

use poplat_core::{SpeciesId, StoreError};
use poplat_store::{OccupantKey, OccupantRef, Population};
use rand::Rng;
use smallvec::SmallVec;

use crate::rate::Rate;

/// What happened to the trigger occupant of a reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    /// The trigger is still live and may take part in further reactions.
    Alive,
    /// The trigger was destroyed; its key must not be used again.
    Destroyed,
}

impl Fate {
    /// `true` for [`Fate::Destroyed`].
    pub fn is_destroyed(self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

/// A probabilistic transformation triggered by one occupant.
///
/// New occupants always belong to the trigger's species and appear at the
/// trigger's site. Only [`Reaction::Death`] can destroy the trigger; the
/// predation variants destroy other occupants, which is observable only
/// through subsequent store queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reaction {
    /// `A -> 2A`: spawn one occupant of the trigger's species.
    Birth {
        /// Acceptance rate.
        rate: Rate,
    },
    /// `A -> 0`: destroy the trigger.
    Death {
        /// Acceptance rate.
        rate: Rate,
    },
    /// `A + B -> A`: each prey at the trigger's site is independently
    /// eaten.
    Predation {
        /// Species preyed upon.
        prey: SpeciesId,
        /// Per-victim acceptance rate.
        rate: Rate,
    },
    /// `A + B -> 2A`: as predation, but each eaten prey is replaced by a
    /// new occupant of the predator's species.
    PredationBirth {
        /// Species preyed upon.
        prey: SpeciesId,
        /// Per-victim acceptance rate.
        rate: Rate,
    },
}

impl Reaction {
    /// The reaction's acceptance rate.
    pub fn rate(&self) -> Rate {
        match *self {
            Self::Birth { rate }
            | Self::Death { rate }
            | Self::Predation { rate, .. }
            | Self::PredationBirth { rate, .. } => rate,
        }
    }

    /// The prey species, for the predation variants.
    pub fn prey(&self) -> Option<SpeciesId> {
        match *self {
            Self::Predation { prey, .. } | Self::PredationBirth { prey, .. } => Some(prey),
            Self::Birth { .. } | Self::Death { .. } => None,
        }
    }

    /// Decide and, if accepted, perform this reaction for `trigger`.
    ///
    /// Randomness consumed: one decision for birth and death; one decision
    /// per prey present at the trigger's site for the predation variants,
    /// all made before any victim is destroyed.
    ///
    /// Returns `Err(StoreError::StaleOccupant)` if `trigger` is not live.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        population: &mut Population,
        trigger: OccupantKey,
        rng: &mut R,
    ) -> Result<Fate, StoreError> {
        let occupant = population
            .occupant(trigger)
            .ok_or_else(|| stale(trigger))?;

        match *self {
            Self::Birth { rate } => {
                if rate.decide(rng) {
                    population.spawn(occupant.species, occupant.site)?;
                }
                Ok(Fate::Alive)
            }
            Self::Death { rate } => {
                if rate.decide(rng) {
                    population.despawn(trigger)?;
                    Ok(Fate::Destroyed)
                } else {
                    Ok(Fate::Alive)
                }
            }
            Self::Predation { prey, rate } => {
                for victim in select_victims(population, trigger, &occupant, prey, rate, rng) {
                    population.despawn(victim)?;
                }
                Ok(Fate::Alive)
            }
            Self::PredationBirth { prey, rate } => {
                for victim in select_victims(population, trigger, &occupant, prey, rate, rng) {
                    population.despawn(victim)?;
                    population.spawn(occupant.species, occupant.site)?;
                }
                Ok(Fate::Alive)
            }
        }
    }
}

/// Snapshot the prey at the predator's site and decide each one.
///
/// The snapshot is taken before anything is destroyed, so exactly one
/// decision is made per prey present. The trigger itself is never a
/// candidate, which makes same-species predation (`A + A -> A`) safe.
fn select_victims<R: Rng + ?Sized>(
    population: &Population,
    trigger: OccupantKey,
    predator: &OccupantRef,
    prey: SpeciesId,
    rate: Rate,
    rng: &mut R,
) -> SmallVec<[OccupantKey; 8]> {
    let candidates: SmallVec<[OccupantKey; 8]> = population
        .occupants_at(predator.site, prey)
        .iter()
        .copied()
        .filter(|&k| k != trigger)
        .collect();
    candidates
        .into_iter()
        .filter(|_| rate.decide(rng))
        .collect()
}

pub(crate) fn stale(key: OccupantKey) -> StoreError {
    StoreError::StaleOccupant {
        slot: key.slot(),
        generation: key.generation(),
    }
}
