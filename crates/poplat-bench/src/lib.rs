//! Benchmark profiles for the poplat simulation framework.
//!
//! Provides pre-built [`WorldConfig`] profiles for benchmarks:
//!
//! - [`reference_profile`]: 64x64 grid with a three-level food chain
//! - [`stress_profile`]: 256x256 grid, same rules, roughly 16x the
//!   population

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use poplat_engine::WorldConfig;
use poplat_reaction::ReactionDef;

/// Grass grows, hares eat grass, foxes eat hares. Hares and foxes move.
fn food_chain(width: u32, height: u32, seed: u64) -> WorldConfig {
    WorldConfig::new(width, height)
        .species("grass", vec![ReactionDef::birth(0.1), ReactionDef::death(0.05)])
        .species(
            "hare",
            vec![
                ReactionDef::predation_birth("grass", 0.2),
                ReactionDef::death(0.1),
            ],
        )
        .species(
            "fox",
            vec![
                ReactionDef::predation_birth("hare", 0.3),
                ReactionDef::death(0.15),
            ],
        )
        .density("grass", 2.0)
        .density("hare", 0.5)
        .density("fox", 0.1)
        .movement("hare", 1.0)
        .movement("fox", 1.0)
        .with_seed(seed)
}

/// Build the reference benchmark profile: 64x64 grid (4096 sites).
pub fn reference_profile(seed: u64) -> WorldConfig {
    food_chain(64, 64, seed)
}

/// Build the stress benchmark profile: 256x256 grid (65536 sites).
pub fn stress_profile(seed: u64) -> WorldConfig {
    food_chain(256, 256, seed)
}
