//! World configuration, validation, and error types.
//!
//! [`WorldConfig`] is the input for [`World::new`](crate::World::new).
//! [`validate()`](WorldConfig::validate) checks every structural
//! invariant without building anything; `World::new` calls it first.

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use poplat_core::StoreError;
use poplat_reaction::{Rate, ReactionDef};
use poplat_space::SpaceError;
use poplat_store::IndexChecks;
use rand_distr::Poisson;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`WorldConfig::validate()`] or world
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions are invalid.
    Space(SpaceError),
    /// The species registry rejected a name.
    Store(StoreError),
    /// A species named in `densities` or `movement` has no entry in
    /// `reactions`.
    MissingReactions {
        /// The species name.
        species: String,
        /// Which map referenced it (`"densities"` or `"movement"`).
        referenced_by: &'static str,
    },
    /// A predation reaction names a prey species with no entry in
    /// `reactions`.
    UnknownPrey {
        /// The species carrying the reaction.
        predator: String,
        /// The unresolved prey name.
        prey: String,
    },
    /// A movement or reaction rate is negative, NaN or infinite.
    InvalidRate {
        /// The species the rate belongs to.
        species: String,
        /// The rejected value.
        rate: f64,
    },
    /// An initial density is negative, NaN, infinite, or too large to
    /// sample.
    InvalidDensity {
        /// The species the density belongs to.
        species: String,
        /// The rejected value.
        density: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::MissingReactions {
                species,
                referenced_by,
            } => write!(
                f,
                "species '{species}' appears in {referenced_by} but has no reactions entry"
            ),
            Self::UnknownPrey { predator, prey } => {
                write!(f, "species '{predator}' preys on unknown species '{prey}'")
            }
            Self::InvalidRate { species, rate } => write!(
                f,
                "rate {rate} for species '{species}' must be finite and non-negative"
            ),
            Self::InvalidDensity { species, density } => write!(
                f,
                "density {density} for species '{species}' must be finite and non-negative"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ── WorldConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a [`World`](crate::World).
///
/// The world's species are exactly the keys of `reactions`, registered in
/// map order; that order also fixes the order in which occupants are
/// counted during selection. A species that never reacts still needs an
/// (empty) entry.
///
/// # Examples
///
/// ```
/// use poplat_engine::WorldConfig;
/// use poplat_reaction::ReactionDef;
///
/// let config = WorldConfig::new(8, 8)
///     .species("hare", vec![ReactionDef::birth(0.3)])
///     .species("fox", vec![ReactionDef::predation_birth("hare", 0.5), ReactionDef::death(0.1)])
///     .density("hare", 2.0)
///     .density("fox", 0.5)
///     .movement("hare", 1.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
    /// Poisson mean of the initial count per site, per species.
    pub densities: IndexMap<String, f64>,
    /// Hop rate per species. Species without an entry never move.
    pub movement: IndexMap<String, f64>,
    /// Ordered reaction list per species.
    pub reactions: IndexMap<String, Vec<ReactionDef>>,
    /// Seed for the random stream. `None` draws one from the thread RNG;
    /// [`World::seed`](crate::World::seed) reports it either way.
    pub seed: Option<u64>,
    /// Index verification mode for the population store.
    pub index_checks: IndexChecks,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl WorldConfig {
    /// An empty configuration for a `width * height` grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            densities: IndexMap::new(),
            movement: IndexMap::new(),
            reactions: IndexMap::new(),
            seed: None,
            index_checks: IndexChecks::default(),
        }
    }

    /// Declare a species with its ordered reaction list.
    pub fn species(mut self, name: impl Into<String>, reactions: Vec<ReactionDef>) -> Self {
        self.reactions.insert(name.into(), reactions);
        self
    }

    /// Set the initial Poisson density of a species.
    pub fn density(mut self, name: impl Into<String>, density: f64) -> Self {
        self.densities.insert(name.into(), density);
        self
    }

    /// Give a species a hop at `rate`.
    pub fn movement(mut self, name: impl Into<String>, rate: f64) -> Self {
        self.movement.insert(name.into(), rate);
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Select the store's index verification mode.
    pub fn with_index_checks(mut self, checks: IndexChecks) -> Self {
        self.index_checks = checks;
        self
    }

    /// Validate all structural invariants.
    ///
    /// Returns the first violation found, checking grid, densities,
    /// movement and reactions in that order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid must be non-empty and addressable by u32 site IDs.
        if self.width == 0 || self.height == 0 {
            return Err(SpaceError::EmptySpace.into());
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(SpaceError::CellCountOverflow {
                width: self.width,
                height: self.height,
            }
            .into());
        }

        // 2. Densities reference declared species and are usable means.
        for (species, &density) in &self.densities {
            self.require_declared(species, "densities")?;
            initial_distribution(species, density)?;
        }

        // 3. Movement references declared species with valid rates.
        for (species, &rate) in &self.movement {
            self.require_declared(species, "movement")?;
            check_rate(species, rate)?;
        }

        // 4. Reaction rates are valid and prey are declared.
        for (species, defs) in &self.reactions {
            for def in defs {
                check_rate(species, def.rate())?;
                if let Some(prey) = def.prey() {
                    if !self.reactions.contains_key(prey) {
                        return Err(ConfigError::UnknownPrey {
                            predator: species.clone(),
                            prey: prey.to_owned(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn require_declared(&self, species: &str, referenced_by: &'static str) -> Result<(), ConfigError> {
        if self.reactions.contains_key(species) {
            Ok(())
        } else {
            Err(ConfigError::MissingReactions {
                species: species.to_owned(),
                referenced_by,
            })
        }
    }
}

/// The initial-count distribution for a density; `None` when it is zero.
///
/// Rejects negative and non-finite densities, and means too large for
/// [`Poisson`] to sample.
pub(crate) fn initial_distribution(
    species: &str,
    density: f64,
) -> Result<Option<Poisson<f64>>, ConfigError> {
    let invalid = || ConfigError::InvalidDensity {
        species: species.to_owned(),
        density,
    };
    if !density.is_finite() || density < 0.0 {
        return Err(invalid());
    }
    if density == 0.0 {
        return Ok(None);
    }
    Poisson::new(density).map(Some).map_err(|_| invalid())
}

fn check_rate(species: &str, rate: f64) -> Result<Rate, ConfigError> {
    Rate::new(rate).ok_or_else(|| ConfigError::InvalidRate {
        species: species.to_owned(),
        rate,
    })
}
