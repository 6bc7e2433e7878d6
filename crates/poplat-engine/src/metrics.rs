//! Per-iteration reports and per-step metrics.
//!
//! [`IterationReport`] describes what happened to the selected occupant
//! in one iteration. [`StepMetrics`] aggregates a whole step.

use poplat_core::{OccupantId, SiteId, SpeciesId, StepId};

/// Outcome of a single [`World::iteration`](crate::World::iteration).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IterationReport {
    /// The selected occupant.
    pub occupant: OccupantId,
    /// Its species.
    pub species: SpeciesId,
    /// Its site after any movement.
    pub site: SiteId,
    /// Whether its species hops, which always relocates it.
    pub moved: bool,
    /// Whether one of its reactions destroyed it.
    pub destroyed: bool,
}

/// Counters collected during a single [`World::step`](crate::World::step).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Zero-based index of the step.
    pub step: StepId,
    /// Iterations scheduled: the live population when the step began.
    pub scheduled: usize,
    /// Iterations actually performed. Less than `scheduled` only when
    /// the population went extinct.
    pub iterations: usize,
    /// Live population when the step began.
    pub population_before: usize,
    /// Live population when the step ended.
    pub population_after: usize,
    /// Iterations whose selected occupant hopped.
    pub moves: usize,
    /// Iterations whose selected occupant was destroyed.
    pub trigger_deaths: usize,
    /// The population reached zero before all scheduled iterations ran.
    pub extinct: bool,
    /// Wall-clock time for the step, in microseconds.
    pub total_us: u64,
}

impl StepMetrics {
    /// Fold one iteration into the counters.
    pub(crate) fn record(&mut self, report: &IterationReport) {
        self.iterations += 1;
        self.moves += usize::from(report.moved);
        self.trigger_deaths += usize::from(report.destroyed);
    }
}
