//! Analysis result types.

use crate::config::RqaMode;
use crate::distance::DistanceMatrix;
use crate::stats::{Degeneracy, LineHistograms, LineStats};
use crate::threshold::RecurrenceMatrix;

/// Outcome of the line-statistics pass.
///
/// Degenerate matrices (no recurrent points, or too small for the
/// requested minimum line length) carry no statistic fields at all, so
/// sentinel values can never be mistaken for measurements.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome {
    /// Line statistics were computed.
    Computed {
        /// The scalar RQA metrics.
        stats: LineStats,
        /// Qualifying run lengths retained for inspection.
        histograms: LineHistograms,
    },
    /// The matrix was degenerate; only the recurrence matrix is available.
    Degenerate(Degeneracy),
}

/// Result of one RQA analysis call.
///
/// Owns the artifacts of a single invocation: the recurrence matrix,
/// the line-statistics outcome, and (when configured) the raw distance
/// matrix. Carries no cross-call state.
#[derive(Debug, Clone, PartialEq)]
pub struct RqaResult {
    mode: RqaMode,
    recurrence: RecurrenceMatrix,
    distance: Option<DistanceMatrix>,
    outcome: StatsOutcome,
}

impl RqaResult {
    pub(crate) fn new(
        mode: RqaMode,
        recurrence: RecurrenceMatrix,
        distance: Option<DistanceMatrix>,
        outcome: StatsOutcome,
    ) -> Self {
        Self {
            mode,
            recurrence,
            distance,
            outcome,
        }
    }

    /// Return the analysis mode.
    #[must_use]
    pub fn mode(&self) -> RqaMode {
        self.mode
    }

    /// Borrow the recurrence matrix.
    #[must_use]
    pub fn recurrence(&self) -> &RecurrenceMatrix {
        &self.recurrence
    }

    /// Borrow the raw distance matrix, when retained via
    /// [`RqaConfig::with_retained_distance`](crate::RqaConfig::with_retained_distance).
    #[must_use]
    pub fn distance(&self) -> Option<&DistanceMatrix> {
        self.distance.as_ref()
    }

    /// Borrow the line statistics, unless the matrix was degenerate.
    #[must_use]
    pub fn stats(&self) -> Option<&LineStats> {
        match &self.outcome {
            StatsOutcome::Computed { stats, .. } => Some(stats),
            StatsOutcome::Degenerate(_) => None,
        }
    }

    /// Borrow the retained run-length histograms, unless degenerate.
    #[must_use]
    pub fn histograms(&self) -> Option<&LineHistograms> {
        match &self.outcome {
            StatsOutcome::Computed { histograms, .. } => Some(histograms),
            StatsOutcome::Degenerate(_) => None,
        }
    }

    /// Return the degeneracy reason, if the matrix was degenerate.
    #[must_use]
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        match &self.outcome {
            StatsOutcome::Computed { .. } => None,
            StatsOutcome::Degenerate(reason) => Some(*reason),
        }
    }

    /// Return true if no line statistics are available.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self.outcome, StatsOutcome::Degenerate(_))
    }

    /// Borrow the full outcome.
    #[must_use]
    pub fn outcome(&self) -> &StatsOutcome {
        &self.outcome
    }

    /// Consume the result and return the recurrence matrix.
    #[must_use]
    pub fn into_recurrence(self) -> RecurrenceMatrix {
        self.recurrence
    }
}
