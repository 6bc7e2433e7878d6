//! Reactions for poplat simulations.
//!
//! A reaction is a probabilistic transformation triggered by one selected
//! occupant. Every reaction carries a [`Rate`]; each opportunity is
//! accepted unconditionally when the rate is at least 1, and otherwise
//! when a fresh uniform draw in `[0, 1)` falls below it.
//!
//! - [`Hop`]: movement to one of the four lattice neighbours. A hop is
//!   always taken; its rate is configuration only.
//! - [`Reaction`]: the closed set of population reactions
//!   (birth, death, predation, predation-birth), dispatched through
//!   [`Reaction::apply`].
//! - [`ReactionDef`]: the name-keyed configuration form, resolved into a
//!   [`Reaction`] once species IDs are known.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod def;
pub mod hop;
pub mod rate;
pub mod reaction;

pub use def::{ReactionDef, ResolveError};
pub use hop::Hop;
pub use rate::Rate;
pub use reaction::{Fate, Reaction};
