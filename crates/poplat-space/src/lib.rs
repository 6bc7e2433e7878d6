//! Lattice topology for poplat simulations.
//!
//! The only backend is [`Torus4`]: a 2D grid with periodic wraparound on
//! both axes where every site has exactly four neighbours. The neighbour
//! order is fixed ([`Direction`]) because the engine selects a hop target
//! from a uniform draw in `[0, 4)` and the mapping must be reproducible.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod torus4;

pub use direction::Direction;
pub use error::SpaceError;
pub use torus4::Torus4;
