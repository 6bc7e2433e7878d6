//! Statistical and reproducibility properties of the engine.

use std::collections::HashMap;
use std::ops::ControlFlow;

use poplat_core::SiteId;
use poplat_engine::{World, WorldConfig};
use poplat_reaction::ReactionDef;
use poplat_test_utils::fixtures::assert_consistent;
use proptest::prelude::*;

fn ecosystem(seed: u64) -> WorldConfig {
    WorldConfig::new(8, 6)
        .species("grass", vec![ReactionDef::birth(0.2), ReactionDef::death(0.1)])
        .species(
            "hare",
            vec![
                ReactionDef::predation_birth("grass", 0.3),
                ReactionDef::death(0.2),
            ],
        )
        .species(
            "fox",
            vec![
                ReactionDef::predation_birth("hare", 0.4),
                ReactionDef::death(0.3),
            ],
        )
        .density("grass", 2.0)
        .density("hare", 0.5)
        .density("fox", 0.2)
        .movement("hare", 0.8)
        .movement("fox", 1.0)
        .with_seed(seed)
}

/// Abundance trajectory over up to `steps` steps, ending at extinction.
fn trajectory(config: WorldConfig, steps: usize) -> Vec<Vec<usize>> {
    let mut world = World::new(config).unwrap();
    let mut out = vec![world.abundances().values().copied().collect()];
    for _ in 0..steps {
        if world.step().is_err() {
            break;
        }
        out.push(world.abundances().values().copied().collect());
    }
    out
}

// ── Reproducibility ─────────────────────────────────────────────

#[test]
fn same_seed_same_trajectory() {
    let a = trajectory(ecosystem(31), 15);
    let b = trajectory(ecosystem(31), 15);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_diverge() {
    let a = trajectory(ecosystem(1), 5);
    let b = trajectory(ecosystem(2), 5);
    assert_ne!(a, b);
}

#[test]
fn run_with_matches_manual_stepping() {
    let mut observed = Vec::new();
    let mut world = World::new(ecosystem(77)).unwrap();
    let done = world
        .run_with(5, |w| {
            observed.push(w.abundances().values().copied().collect::<Vec<_>>());
            ControlFlow::Continue(())
        })
        .unwrap();
    assert_eq!(done, 5);
    assert_eq!(observed, trajectory(ecosystem(77), 5)[1..]);
    assert_consistent(world.population());
}

// ── Selection ───────────────────────────────────────────────────

#[test]
fn selection_is_uniform_over_occupants() {
    let config = WorldConfig::new(2, 1)
        .species("a", Vec::new())
        .species("b", Vec::new())
        .with_seed(4);
    let mut world = World::new(config).unwrap();
    let a = world.species_id("a").unwrap();
    let b = world.species_id("b").unwrap();
    for i in 0..30 {
        world.spawn(a, SiteId(i % 2)).unwrap();
    }
    for _ in 0..10 {
        world.spawn(b, SiteId(1)).unwrap();
    }

    let trials = 40_000;
    let mut per_occupant = HashMap::new();
    let mut species_a = 0usize;
    for _ in 0..trials {
        let report = world.iteration().unwrap();
        *per_occupant.entry(report.occupant).or_insert(0usize) += 1;
        species_a += usize::from(report.species == a);
    }

    let share = species_a as f64 / trials as f64;
    assert!((share - 0.75).abs() < 0.015, "species share {share}");
    assert_eq!(per_occupant.len(), 40);
    for (&id, &hits) in &per_occupant {
        assert!((800..1200).contains(&hits), "occupant {id} selected {hits} times");
    }
}

// ── Conservation ────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn hop_only_dynamics_conserve_every_species(
        width in 1u32..6,
        height in 1u32..6,
        rate in 0.0f64..1.5,
        seed in any::<u64>(),
    ) {
        let config = WorldConfig::new(width, height)
            .species("hare", Vec::new())
            .species("fox", Vec::new())
            .density("hare", 1.0)
            .density("fox", 0.5)
            .movement("hare", rate)
            .movement("fox", 1.0)
            .with_seed(seed);
        let mut world = World::new(config).unwrap();
        let before = world.abundances();
        if world.population().total() > 0 {
            world.run(3).unwrap();
            let m = world.last_metrics().unwrap();
            prop_assert_eq!(m.moves, m.iterations);
        }
        prop_assert_eq!(world.abundances(), before);
        prop_assert!(world.population().verify_integrity().is_ok());
    }
}
