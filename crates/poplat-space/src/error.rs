//! Error types for lattice construction.

use std::fmt;

/// Errors arising from lattice construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a lattice with a zero dimension.
    EmptySpace,
    /// `width * height` does not fit in a `u32` site ID.
    CellCountOverflow {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "lattice must have at least one site"),
            Self::CellCountOverflow { width, height } => {
                write!(f, "lattice {width}x{height} exceeds u32::MAX sites")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
