//! Name-keyed reaction definitions, as written in configuration.

use std::error::Error;
use std::fmt;

use poplat_store::Population;

use crate::rate::Rate;
use crate::reaction::Reaction;

/// A reaction as configured, with prey referenced by species name.
///
/// Resolve against a [`Population`] with [`ReactionDef::resolve`] once the
/// species registry is populated.
#[derive(Clone, Debug, PartialEq)]
pub enum ReactionDef {
    /// `A -> 2A`.
    Birth {
        /// Acceptance rate.
        rate: f64,
    },
    /// `A -> 0`.
    Death {
        /// Acceptance rate.
        rate: f64,
    },
    /// `A + B -> A`.
    Predation {
        /// Name of the prey species.
        prey: String,
        /// Per-victim acceptance rate.
        rate: f64,
    },
    /// `A + B -> 2A`.
    PredationBirth {
        /// Name of the prey species.
        prey: String,
        /// Per-victim acceptance rate.
        rate: f64,
    },
}

impl ReactionDef {
    /// `A -> 2A` at `rate`.
    pub fn birth(rate: f64) -> Self {
        Self::Birth { rate }
    }

    /// `A -> 0` at `rate`.
    pub fn death(rate: f64) -> Self {
        Self::Death { rate }
    }

    /// `A + prey -> A` at `rate`.
    pub fn predation(prey: impl Into<String>, rate: f64) -> Self {
        Self::Predation {
            prey: prey.into(),
            rate,
        }
    }

    /// `A + prey -> 2A` at `rate`.
    pub fn predation_birth(prey: impl Into<String>, rate: f64) -> Self {
        Self::PredationBirth {
            prey: prey.into(),
            rate,
        }
    }

    /// The configured rate, unvalidated.
    pub fn rate(&self) -> f64 {
        match *self {
            Self::Birth { rate }
            | Self::Death { rate }
            | Self::Predation { rate, .. }
            | Self::PredationBirth { rate, .. } => rate,
        }
    }

    /// The prey species name, for the predation variants.
    pub fn prey(&self) -> Option<&str> {
        match self {
            Self::Predation { prey, .. } | Self::PredationBirth { prey, .. } => Some(prey),
            Self::Birth { .. } | Self::Death { .. } => None,
        }
    }

    /// Validate the rate and look up the prey species.
    pub fn resolve(&self, population: &Population) -> Result<Reaction, ResolveError> {
        let rate = Rate::new(self.rate()).ok_or(ResolveError::InvalidRate { rate: self.rate() })?;
        let prey = |name: &str| {
            population
                .species_id(name)
                .ok_or_else(|| ResolveError::UnknownPrey {
                    prey: name.to_owned(),
                })
        };
        Ok(match self {
            Self::Birth { .. } => Reaction::Birth { rate },
            Self::Death { .. } => Reaction::Death { rate },
            Self::Predation { prey: name, .. } => Reaction::Predation {
                prey: prey(name)?,
                rate,
            },
            Self::PredationBirth { prey: name, .. } => Reaction::PredationBirth {
                prey: prey(name)?,
                rate,
            },
        })
    }
}

/// Errors from [`ReactionDef::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub enum ResolveError {
    /// The rate is negative, NaN or infinite.
    InvalidRate {
        /// The rejected value.
        rate: f64,
    },
    /// The prey species is not registered.
    UnknownPrey {
        /// The unresolved name.
        prey: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate { rate } => {
                write!(f, "rate {rate} must be finite and non-negative")
            }
            Self::UnknownPrey { prey } => write!(f, "unknown prey species '{prey}'"),
        }
    }
}

impl Error for ResolveError {}
