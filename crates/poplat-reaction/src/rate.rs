//! Reaction rates and the accept/reject decision.

use std::fmt;

use rand::Rng;

/// Acceptance rate of a reaction, a finite value in `[0, ∞)`.
///
/// Rates at or above 1 always accept without consuming randomness.
/// Smaller rates consume exactly one `f64` draw per decision, so the
/// number of draws a reaction makes does not depend on earlier outcomes.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Rate(f64);

impl Rate {
    /// A rate that always accepts.
    pub const ALWAYS: Rate = Rate(1.0);

    /// Validate a raw rate. Returns `None` for negative, NaN or infinite
    /// values.
    ///
    /// ```
    /// use poplat_reaction::Rate;
    ///
    /// assert!(Rate::new(0.25).is_some());
    /// assert!(Rate::new(3.0).is_some());
    /// assert!(Rate::new(-0.1).is_none());
    /// assert!(Rate::new(f64::NAN).is_none());
    /// ```
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 0.0).then_some(Self(value))
    }

    /// The raw value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this rate accepts without drawing.
    pub fn is_certain(self) -> bool {
        self.0 >= 1.0
    }

    /// Decide one opportunity.
    pub fn decide<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        self.is_certain() || rng.random::<f64>() < self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
