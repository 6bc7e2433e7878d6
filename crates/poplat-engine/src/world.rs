//! The simulation world: initialisation, selection, and stepping.
//!
//! # Draw order
//!
//! A [`World`] consumes its random stream in a fixed order, so the same
//! seed and configuration always reproduce the same trajectory:
//!
//! 1. At construction, one Poisson draw per (site, species with a
//!    density), sites in ID order, species in configuration order.
//! 2. Per iteration: the selection index; then, if the selected species
//!    moves, the hop direction; then each reaction's acceptance draws in
//!    configured order. A hop is always taken and draws nothing else.
//!
//! # Ownership model
//!
//! `World` is [`Send`]. Every mutating method takes `&mut self` and runs
//! to completion; there is no background work.

use std::fmt;
use std::ops::ControlFlow;
use std::time::Instant;

use indexmap::IndexMap;
use poplat_core::{SiteId, SpeciesId, StepError, StepId, StoreError};
use poplat_reaction::{Hop, Rate, Reaction, ResolveError};
use poplat_space::{Direction, Torus4};
use poplat_store::{OccupantKey, Population};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution;

use crate::config::{initial_distribution, ConfigError, WorldConfig};
use crate::grid::OccupancyGrid;
use crate::metrics::{IterationReport, StepMetrics};

const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<World>();
    }
};

/// Species rules, indexed by `SpeciesId`.
struct Rules {
    hops: Vec<Option<Hop>>,
    reactions: Vec<Vec<Reaction>>,
}

/// A lattice population driven by mass-action selection.
///
/// # Examples
///
/// ```
/// use poplat_engine::{World, WorldConfig};
/// use poplat_reaction::ReactionDef;
///
/// let config = WorldConfig::new(6, 6)
///     .species("hare", vec![ReactionDef::birth(0.2), ReactionDef::death(0.2)])
///     .density("hare", 1.0)
///     .movement("hare", 0.5)
///     .with_seed(11);
/// let mut world = World::new(config).unwrap();
///
/// let before = world.abundances()["hare"];
/// if before > 0 {
///     let metrics = world.step().unwrap();
///     assert_eq!(metrics.scheduled, before);
/// }
/// assert_eq!(world.grid_snapshot()["hare"].total(), world.abundances()["hare"]);
/// ```
pub struct World {
    lattice: Torus4,
    population: Population,
    rules: Rules,
    rng: ChaCha8Rng,
    seed: u64,
    step_count: u64,
    last_metrics: Option<StepMetrics>,
}

impl World {
    /// Build and populate a world.
    ///
    /// Validates `config`, registers the species in `reactions` order,
    /// resolves movement and reactions, seeds the random stream, and
    /// places the initial Poisson-distributed occupants.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let lattice = Torus4::new(config.width, config.height)?;
        let mut population = Population::new(lattice.site_count(), config.index_checks);
        for name in config.reactions.keys() {
            population.add_species(name)?;
        }

        let rules = resolve_rules(&config, &population)?;

        let mut densities = Vec::with_capacity(config.densities.len());
        for (name, &density) in &config.densities {
            let species = species_for(&population, name, "densities")?;
            densities.push((species, initial_distribution(name, density)?));
        }

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for site in lattice.sites() {
            for (species, dist) in &densities {
                let Some(dist) = dist else { continue };
                let n = dist.sample(&mut rng) as u64;
                for _ in 0..n {
                    population.spawn(*species, site)?;
                }
            }
        }

        tracing::debug!(
            width = config.width,
            height = config.height,
            species = population.species_count(),
            population = population.total(),
            seed,
            "world initialised"
        );

        Ok(Self {
            lattice,
            population,
            rules,
            rng,
            seed,
            step_count: 0,
            last_metrics: None,
        })
    }

    // ── Simulation ──────────────────────────────────────────────

    /// Perform one iteration: select an occupant, hop it, react it.
    ///
    /// The occupant is chosen uniformly among all live occupants, which
    /// makes each species' selection probability its share of the
    /// population. Reactions stop at the first one that destroys it.
    ///
    /// Returns `Err(StepError::EmptyPopulation)` if nothing is alive.
    pub fn iteration(&mut self) -> Result<IterationReport, StepError> {
        let (species, trigger) = self.select()?;
        let s = species.index();

        let mut moved = false;
        if let Some(hop) = self.rules.hops[s] {
            let direction = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
            let site = hop.apply(&mut self.population, &self.lattice, trigger, direction)?;
            moved = true;
            tracing::trace!(
                species = s,
                ?direction,
                site = %self.lattice.label(site),
                "hop"
            );
        }

        let occupant = self.population.occupant(trigger).ok_or(StoreError::StaleOccupant {
            slot: trigger.slot(),
            generation: trigger.generation(),
        })?;

        let mut destroyed = false;
        for reaction in &self.rules.reactions[s] {
            let fate = reaction.apply(&mut self.population, trigger, &mut self.rng)?;
            if fate.is_destroyed() {
                destroyed = true;
                break;
            }
        }

        Ok(IterationReport {
            occupant: occupant.id,
            species,
            site: occupant.site,
            moved,
            destroyed,
        })
    }

    /// Perform one step: as many iterations as there are live occupants
    /// now.
    ///
    /// If the population dies out part-way, the step ends early with
    /// [`StepMetrics::extinct`] set. Stepping an already empty world
    /// returns `Err(StepError::EmptyPopulation)` and does not count as a
    /// step.
    pub fn step(&mut self) -> Result<StepMetrics, StepError> {
        let started = Instant::now();
        let scheduled = self.population.total();
        if scheduled == 0 {
            return Err(StepError::EmptyPopulation);
        }

        let mut metrics = StepMetrics {
            step: StepId(self.step_count),
            scheduled,
            population_before: scheduled,
            ..StepMetrics::default()
        };

        for _ in 0..scheduled {
            if self.population.total() == 0 {
                metrics.extinct = true;
                tracing::debug!(
                    step = self.step_count,
                    iterations = metrics.iterations,
                    "population extinct, ending step early"
                );
                break;
            }
            let report = self.iteration()?;
            metrics.record(&report);
        }

        metrics.population_after = self.population.total();
        metrics.total_us = started.elapsed().as_micros() as u64;
        self.step_count += 1;

        tracing::trace!(
            step = metrics.step.0,
            iterations = metrics.iterations,
            population = metrics.population_after,
            "step complete"
        );

        self.last_metrics = Some(metrics.clone());
        Ok(metrics)
    }

    /// Perform `steps` steps, stopping at the first error.
    pub fn run(&mut self, steps: u64) -> Result<(), StepError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Perform up to `steps` steps, calling `observer` after each one.
    ///
    /// Returning [`ControlFlow::Break`] from the observer stops the run
    /// before the next step. Returns the number of steps performed.
    pub fn run_with<F>(&mut self, steps: u64, mut observer: F) -> Result<u64, StepError>
    where
        F: FnMut(&World) -> ControlFlow<()>,
    {
        let mut done = 0;
        while done < steps {
            self.step()?;
            done += 1;
            if observer(self).is_break() {
                break;
            }
        }
        Ok(done)
    }

    /// Place one occupant of `species` at `site`.
    ///
    /// Intended for building exact initial conditions; draws no
    /// randomness.
    pub fn spawn(&mut self, species: SpeciesId, site: SiteId) -> Result<OccupantKey, StoreError> {
        self.population.spawn(species, site)
    }

    // ── Views ───────────────────────────────────────────────────

    /// Live count per species, in species order.
    pub fn abundances(&self) -> IndexMap<String, usize> {
        self.population
            .species_ids()
            .filter_map(|s| {
                let name = self.population.species_name(s)?;
                Some((name.to_owned(), self.population.count(s)))
            })
            .collect()
    }

    /// Per-species occupancy grids, in species order.
    ///
    /// Recomputed from the store on every call.
    pub fn grid_snapshot(&self) -> IndexMap<String, OccupancyGrid> {
        let (width, height) = (self.lattice.width(), self.lattice.height());
        self.population
            .species_ids()
            .filter_map(|s| {
                let name = self.population.species_name(s)?;
                let counts = self
                    .lattice
                    .sites()
                    .map(|site| self.population.count_at(site, s))
                    .collect();
                let grid = OccupancyGrid::from_counts(width, height, counts)?;
                Some((name.to_owned(), grid))
            })
            .collect()
    }

    /// Look up a species by name.
    pub fn species_id(&self, name: &str) -> Option<SpeciesId> {
        self.population.species_id(name)
    }

    /// The seed the random stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Metrics of the most recent step, if any.
    pub fn last_metrics(&self) -> Option<&StepMetrics> {
        self.last_metrics.as_ref()
    }

    /// The lattice.
    pub fn lattice(&self) -> &Torus4 {
        &self.lattice
    }

    /// The population store.
    pub fn population(&self) -> &Population {
        &self.population
    }

    // ── Internals ───────────────────────────────────────────────

    /// Draw a live occupant uniformly.
    fn select(&mut self) -> Result<(SpeciesId, OccupantKey), StepError> {
        let total = self.population.total();
        if total == 0 {
            return Err(StepError::EmptyPopulation);
        }
        let index = self.rng.random_range(0..total);
        locate(&self.population, index)
    }
}

/// Map a global index onto the species lists, walking species in ID
/// order.
fn locate(population: &Population, index: usize) -> Result<(SpeciesId, OccupantKey), StepError> {
    let out_of_range = || StepError::SelectionOutOfRange {
        index,
        total: population.total(),
    };
    let mut k = index;
    for species in population.species_ids() {
        let n = population.count(species);
        if k < n {
            return population
                .member(species, k)
                .map(|key| (species, key))
                .ok_or_else(out_of_range);
        }
        k -= n;
    }
    Err(out_of_range())
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("width", &self.lattice.width())
            .field("height", &self.lattice.height())
            .field("species", &self.population.species_count())
            .field("population", &self.population.total())
            .field("seed", &self.seed)
            .field("step_count", &self.step_count)
            .finish()
    }
}

fn species_for(
    population: &Population,
    name: &str,
    referenced_by: &'static str,
) -> Result<SpeciesId, ConfigError> {
    population
        .species_id(name)
        .ok_or_else(|| ConfigError::MissingReactions {
            species: name.to_owned(),
            referenced_by,
        })
}

fn resolve_rules(config: &WorldConfig, population: &Population) -> Result<Rules, ConfigError> {
    let n = population.species_count();
    let mut hops = vec![None; n];
    let mut reactions = Vec::with_capacity(n);

    for (name, defs) in &config.reactions {
        let resolved = defs
            .iter()
            .map(|def| {
                def.resolve(population).map_err(|e| match e {
                    ResolveError::InvalidRate { rate } => ConfigError::InvalidRate {
                        species: name.clone(),
                        rate,
                    },
                    ResolveError::UnknownPrey { prey } => ConfigError::UnknownPrey {
                        predator: name.clone(),
                        prey,
                    },
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        reactions.push(resolved);
    }

    for (name, &rate) in &config.movement {
        let species = species_for(population, name, "movement")?;
        let rate = Rate::new(rate).ok_or_else(|| ConfigError::InvalidRate {
            species: name.clone(),
            rate,
        })?;
        hops[species.index()] = Some(Hop::new(rate));
    }

    Ok(Rules { hops, reactions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use poplat_reaction::ReactionDef;
    use poplat_store::IndexChecks;
    use poplat_test_utils::fixtures::assert_consistent;

    fn hares(width: u32, height: u32, defs: Vec<ReactionDef>) -> WorldConfig {
        WorldConfig::new(width, height)
            .species("hare", defs)
            .with_seed(1)
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn species_follow_reactions_order() {
        let config = WorldConfig::new(2, 2)
            .species("fox", Vec::new())
            .species("hare", Vec::new())
            .density("hare", 1.0)
            .with_seed(3);
        let world = World::new(config).unwrap();
        let names: Vec<_> = world.abundances().keys().cloned().collect();
        assert_eq!(names, ["fox", "hare"]);
        assert_eq!(world.species_id("hare"), Some(SpeciesId(1)));
        assert_eq!(world.abundances()["fox"], 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = hares(3, 3, Vec::new()).density("wolf", 1.0);
        assert!(matches!(
            World::new(config),
            Err(ConfigError::MissingReactions { .. })
        ));
    }

    #[test]
    fn zero_density_places_nothing() {
        let world = World::new(hares(4, 4, Vec::new()).density("hare", 0.0)).unwrap();
        assert_eq!(world.population().total(), 0);
    }

    #[test]
    fn initial_counts_track_density() {
        let world = World::new(hares(20, 20, Vec::new()).density("hare", 3.0)).unwrap();
        let mean = world.population().total() as f64 / 400.0;
        assert!((mean - 3.0).abs() < 0.3, "mean initial count {mean}");
        assert_consistent(world.population());
    }

    #[test]
    fn unseeded_world_records_its_seed() {
        let config = WorldConfig::new(5, 5)
            .species("hare", Vec::new())
            .density("hare", 2.0);
        let a = World::new(config.clone()).unwrap();
        let b = World::new(config.with_seed(a.seed())).unwrap();
        assert_eq!(a.abundances(), b.abundances());
        assert_eq!(a.grid_snapshot(), b.grid_snapshot());
    }

    // ── Stepping ────────────────────────────────────────────────

    #[test]
    fn empty_world_cannot_step() {
        let mut world = World::new(hares(2, 2, vec![ReactionDef::birth(1.0)])).unwrap();
        assert_eq!(world.iteration(), Err(StepError::EmptyPopulation));
        assert_eq!(world.step(), Err(StepError::EmptyPopulation));
        assert_eq!(world.step_count(), 0);
        assert!(world.last_metrics().is_none());
    }

    #[test]
    fn death_short_circuits_later_reactions() {
        let mut world = World::new(hares(
            2,
            1,
            vec![ReactionDef::death(1.0), ReactionDef::birth(1.0)],
        ))
        .unwrap();
        let hare = world.species_id("hare").unwrap();
        for _ in 0..5 {
            world.spawn(hare, SiteId(0)).unwrap();
        }
        let report = world.iteration().unwrap();
        assert!(report.destroyed);
        assert_eq!(world.abundances()["hare"], 4);

        let metrics = world.step().unwrap();
        assert_eq!(metrics.scheduled, 4);
        assert_eq!(metrics.iterations, 4);
        assert_eq!(metrics.trigger_deaths, 4);
        assert_eq!(metrics.population_after, 0);
        assert!(!metrics.extinct);
    }

    #[test]
    fn extinction_ends_step_early() {
        // Each fox eats every other fox at its site, then dies.
        let config = WorldConfig::new(1, 1)
            .species(
                "fox",
                vec![ReactionDef::predation("fox", 1.0), ReactionDef::death(1.0)],
            )
            .with_seed(5);
        let mut world = World::new(config).unwrap();
        let fox = world.species_id("fox").unwrap();
        for _ in 0..4 {
            world.spawn(fox, SiteId(0)).unwrap();
        }

        let metrics = world.step().unwrap();
        assert_eq!(metrics.scheduled, 4);
        assert_eq!(metrics.iterations, 1);
        assert!(metrics.extinct);
        assert_eq!(world.last_metrics(), Some(&metrics));
        assert_eq!(world.step_count(), 1);
        assert_eq!(world.step(), Err(StepError::EmptyPopulation));
    }

    #[test]
    fn hop_only_dynamics_conserve_population() {
        let config = hares(5, 4, Vec::new())
            .density("hare", 1.5)
            .movement("hare", 0.6);
        let mut world = World::new(config).unwrap();
        let start = world.population().total();
        if start == 0 {
            return;
        }
        world.run(10).unwrap();
        assert_eq!(world.population().total(), start);
        assert_eq!(world.step_count(), 10);
        let metrics = world.last_metrics().unwrap();
        assert_eq!(metrics.iterations, start);
        assert_eq!(metrics.moves, start);
        assert_consistent(world.population());
    }

    #[test]
    fn certain_hop_always_moves_on_a_real_torus() {
        let config = hares(3, 3, Vec::new()).movement("hare", 1.0);
        let mut world = World::new(config).unwrap();
        let hare = world.species_id("hare").unwrap();
        world.spawn(hare, SiteId(4)).unwrap();
        let report = world.iteration().unwrap();
        assert!(report.moved);
        assert_eq!(world.lattice().distance(SiteId(4), report.site), 1);
    }

    #[test]
    fn fractional_hop_rate_still_moves_every_iteration() {
        let config = hares(4, 4, Vec::new()).movement("hare", 0.5);
        let mut world = World::new(config).unwrap();
        let hare = world.species_id("hare").unwrap();
        let key = world.spawn(hare, SiteId(5)).unwrap();

        for _ in 0..200 {
            let before = world.population().occupant(key).unwrap().site;
            let report = world.iteration().unwrap();
            assert!(report.moved);
            assert_eq!(world.lattice().distance(before, report.site), 1);
        }
    }

    #[test]
    fn species_without_movement_never_moves() {
        let mut world = World::new(hares(3, 3, Vec::new())).unwrap();
        let hare = world.species_id("hare").unwrap();
        world.spawn(hare, SiteId(4)).unwrap();
        for _ in 0..20 {
            let report = world.iteration().unwrap();
            assert!(!report.moved);
            assert_eq!(report.site, SiteId(4));
        }
    }

    #[test]
    fn unchecked_mode_runs_the_same_trajectory() {
        let config = WorldConfig::new(6, 6)
            .species(
                "hare",
                vec![ReactionDef::birth(0.3), ReactionDef::death(0.25)],
            )
            .density("hare", 1.0)
            .movement("hare", 0.5)
            .with_seed(99);
        let mut checked = World::new(config.clone()).unwrap();
        let mut unchecked =
            World::new(config.with_index_checks(IndexChecks::Unchecked)).unwrap();
        for _ in 0..5 {
            let a = checked.step().map(|m| m.population_after);
            let b = unchecked.step().map(|m| m.population_after);
            assert_eq!(a, b);
            if a.is_err() {
                break;
            }
        }
        assert_eq!(checked.grid_snapshot(), unchecked.grid_snapshot());
    }

    // ── Selection ───────────────────────────────────────────────

    #[test]
    fn locate_walks_species_in_id_order() {
        let config = WorldConfig::new(2, 1)
            .species("fox", Vec::new())
            .species("hare", Vec::new())
            .with_seed(1);
        let mut world = World::new(config).unwrap();
        let fox = world.species_id("fox").unwrap();
        let hare = world.species_id("hare").unwrap();
        let f0 = world.spawn(fox, SiteId(0)).unwrap();
        let h0 = world.spawn(hare, SiteId(1)).unwrap();
        let h1 = world.spawn(hare, SiteId(0)).unwrap();

        let pop = world.population();
        assert_eq!(locate(pop, 0), Ok((fox, f0)));
        assert_eq!(locate(pop, 1), Ok((hare, h0)));
        assert_eq!(locate(pop, 2), Ok((hare, h1)));
    }

    #[test]
    fn locate_past_the_total_is_out_of_range() {
        let mut world = World::new(hares(2, 2, Vec::new())).unwrap();
        let hare = world.species_id("hare").unwrap();
        world.spawn(hare, SiteId(0)).unwrap();
        world.spawn(hare, SiteId(3)).unwrap();

        assert_eq!(
            locate(world.population(), 2),
            Err(StepError::SelectionOutOfRange { index: 2, total: 2 })
        );
        let empty = Population::new(4, IndexChecks::Checked);
        assert_eq!(
            locate(&empty, 0),
            Err(StepError::SelectionOutOfRange { index: 0, total: 0 })
        );
    }

    // ── Run control ─────────────────────────────────────────────

    #[test]
    fn run_with_stops_on_break() {
        let config = hares(3, 3, Vec::new()).movement("hare", 1.0);
        let mut world = World::new(config).unwrap();
        let hare = world.species_id("hare").unwrap();
        world.spawn(hare, SiteId(0)).unwrap();

        let mut seen = Vec::new();
        let done = world
            .run_with(10, |w| {
                seen.push(w.step_count());
                if w.step_count() == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(done, 3);
        assert_eq!(seen, [1, 2, 3]);
    }

    #[test]
    fn run_propagates_empty_population() {
        let mut world = World::new(hares(1, 1, vec![ReactionDef::death(1.0)])).unwrap();
        let hare = world.species_id("hare").unwrap();
        world.spawn(hare, SiteId(0)).unwrap();
        assert_eq!(world.run(3), Err(StepError::EmptyPopulation));
        assert_eq!(world.step_count(), 1);
    }

    // ── Views ───────────────────────────────────────────────────

    #[test]
    fn grid_snapshot_places_counts_by_coordinate() {
        let mut world = World::new(hares(3, 2, Vec::new())).unwrap();
        let hare = world.species_id("hare").unwrap();
        let site = world.lattice().site_at(2, 1).unwrap();
        world.spawn(hare, site).unwrap();
        world.spawn(hare, site).unwrap();

        let grids = world.grid_snapshot();
        let grid = &grids["hare"];
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.get(2, 1), Some(2));
        assert_eq!(grid.row(0), Some(&[0, 0, 0][..]));
        assert_eq!(grid.total(), 2);
    }

    #[test]
    fn spawn_rejects_unknown_site() {
        let mut world = World::new(hares(2, 2, Vec::new())).unwrap();
        let hare = world.species_id("hare").unwrap();
        assert!(matches!(
            world.spawn(hare, SiteId(4)),
            Err(StoreError::UnknownSite { .. })
        ));
    }
}
