//! Population fixtures and store assertions.
//!
//! - [`predator_prey`]: a two-species store (`fox` hunts `hare`).
//! - [`fill_site`]: spawn a batch of occupants at one site.
//! - [`assert_consistent`]: panic with a readable message on any index
//!   inconsistency.

use poplat_core::{SiteId, SpeciesId};
use poplat_store::{IndexChecks, OccupantKey, Population};

/// A checked store over `sites` sites with `fox` (ID 0) and `hare` (ID 1)
/// registered.
pub fn predator_prey(sites: usize) -> (Population, SpeciesId, SpeciesId) {
    let mut pop = Population::new(sites, IndexChecks::Checked);
    let fox = pop
        .add_species("fox")
        .unwrap_or_else(|e| panic!("fixture species: {e}"));
    let hare = pop
        .add_species("hare")
        .unwrap_or_else(|e| panic!("fixture species: {e}"));
    (pop, fox, hare)
}

/// Spawn `n` occupants of `species` at `site`.
pub fn fill_site(
    pop: &mut Population,
    species: SpeciesId,
    site: SiteId,
    n: usize,
) -> Vec<OccupantKey> {
    (0..n)
        .map(|_| {
            pop.spawn(species, site)
                .unwrap_or_else(|e| panic!("fixture spawn at {site}: {e}"))
        })
        .collect()
}

/// Assert that both indexes agree and that per-site counts sum to the
/// species totals.
pub fn assert_consistent(pop: &Population) {
    if let Err(e) = pop.verify_integrity() {
        panic!("population index inconsistent: {e}");
    }
    for species in pop.species_ids() {
        let by_site: usize = (0..pop.site_count() as u32)
            .map(|s| pop.count_at(SiteId(s), species))
            .sum();
        assert_eq!(
            by_site,
            pop.count(species),
            "species {species}: site lists hold {by_site}, species list holds {}",
            pop.count(species)
        );
    }
}
