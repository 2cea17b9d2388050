//! Analysis entry points: auto / cross RQA, multivariate variants, and
//! diagonal recurrence profiles.

use tracing::{debug, instrument};

use crate::config::{RqaConfig, RqaMode};
use crate::distance::DistanceMatrix;
use crate::drp::DiagonalProfile;
use crate::embed::Trajectory;
use crate::error::RqaError;
use crate::result::{RqaResult, StatsOutcome};
use crate::series::{MultiSeries, Series};
use crate::stats;
use crate::threshold::RecurrenceMatrix;

/// Immutable RQA analyzer. Thread-safe; one instance serves any number
/// of independent analyses.
///
/// Each call is self-contained: embed → distance → threshold → scan,
/// with no state shared across calls.
///
/// ```
/// use echo_rqa::{Rqa, RqaConfig, Series};
///
/// let series = Series::new((0..64).map(|i| f64::from(i % 4)).collect())?;
/// let rqa = Rqa::new(RqaConfig::new(0.5)?.with_embedding(2, 1)?);
/// let result = rqa.auto(&series)?;
/// assert!(result.stats().is_some());
/// # Ok::<(), echo_rqa::RqaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Rqa {
    config: RqaConfig,
}

impl Rqa {
    /// Create an analyzer from a validated configuration.
    #[must_use]
    pub fn new(config: RqaConfig) -> Self {
        Self { config }
    }

    /// Borrow the configuration.
    #[must_use]
    pub fn config(&self) -> &RqaConfig {
        &self.config
    }

    /// Auto-RQA of a scalar series against itself.
    ///
    /// Delay-embeds the series with the configured `(dim, lag)`,
    /// thresholds with the configured Theiler window, and scans line
    /// structures in [`RqaMode::Auto`].
    ///
    /// # Errors
    ///
    /// Returns [`RqaError::EmbeddingTooLong`] when the embedding window
    /// does not fit the series.
    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn auto(&self, series: &Series) -> Result<RqaResult, RqaError> {
        let traj = self.embed(series)?;
        self.analyze(&traj, &traj, RqaMode::Auto)
    }

    /// Cross-RQA between two scalar series.
    ///
    /// Both series are embedded with the same `(dim, lag)`. The Theiler
    /// window is forced to zero regardless of configuration: a cross
    /// plot has no self-match diagonal to exclude.
    ///
    /// # Errors
    ///
    /// Returns [`RqaError::EmbeddingTooLong`] when the embedding window
    /// does not fit either series.
    #[instrument(skip(self, a, b), fields(n = a.len(), m = b.len()))]
    pub fn cross(&self, a: &Series, b: &Series) -> Result<RqaResult, RqaError> {
        let ta = self.embed(a)?;
        let tb = self.embed(b)?;
        self.analyze(&ta, &tb, RqaMode::Cross)
    }

    /// Auto-RQA of a multivariate series.
    ///
    /// Sample rows are used directly as phase-space points; the
    /// configured embedding dimension and delay are ignored.
    #[instrument(skip(self, series), fields(n = series.len(), channels = series.channels()))]
    pub fn auto_multivariate(&self, series: &MultiSeries) -> Result<RqaResult, RqaError> {
        let traj = Trajectory::from_samples(series);
        self.analyze(&traj, &traj, RqaMode::Auto)
    }

    /// Cross-RQA between two multivariate series.
    ///
    /// # Errors
    ///
    /// Returns [`RqaError::ChannelMismatch`] when the two series have
    /// different channel counts.
    #[instrument(skip(self, a, b), fields(n = a.len(), m = b.len()))]
    pub fn cross_multivariate(
        &self,
        a: &MultiSeries,
        b: &MultiSeries,
    ) -> Result<RqaResult, RqaError> {
        if a.channels() != b.channels() {
            return Err(RqaError::ChannelMismatch {
                left: a.channels(),
                right: b.channels(),
            });
        }
        let ta = Trajectory::from_samples(a);
        let tb = Trajectory::from_samples(b);
        self.analyze(&ta, &tb, RqaMode::Cross)
    }

    /// Diagonal recurrence profile of a scalar series against itself.
    ///
    /// Embeds and thresholds exactly like [`auto`][Rqa::auto] but skips
    /// the line-statistics pass.
    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn auto_profile(&self, series: &Series) -> Result<DiagonalProfile, RqaError> {
        let traj = self.embed(series)?;
        let r = self.threshold(&traj, &traj, RqaMode::Auto)?;
        Ok(DiagonalProfile::from_recurrence(&r))
    }

    /// Diagonal recurrence profile between two scalar series.
    ///
    /// The Theiler window is forced to zero, as in [`cross`][Rqa::cross].
    #[instrument(skip(self, a, b), fields(n = a.len(), m = b.len()))]
    pub fn cross_profile(&self, a: &Series, b: &Series) -> Result<DiagonalProfile, RqaError> {
        let ta = self.embed(a)?;
        let tb = self.embed(b)?;
        let r = self.threshold(&ta, &tb, RqaMode::Cross)?;
        Ok(DiagonalProfile::from_recurrence(&r))
    }

    fn embed(&self, series: &Series) -> Result<Trajectory, RqaError> {
        Trajectory::delay(
            series.as_view(),
            self.config.embedding_dim,
            self.config.delay,
        )
    }

    /// The Theiler window actually applied for a mode.
    fn effective_theiler(&self, mode: RqaMode) -> usize {
        match mode {
            RqaMode::Auto => self.config.theiler,
            RqaMode::Cross => 0,
        }
    }

    fn threshold(
        &self,
        a: &Trajectory,
        b: &Trajectory,
        mode: RqaMode,
    ) -> Result<RecurrenceMatrix, RqaError> {
        let distance = DistanceMatrix::between(a, b);
        RecurrenceMatrix::from_distance(
            &distance,
            self.config.rescale,
            self.config.radius,
            self.effective_theiler(mode),
        )
    }

    fn analyze(
        &self,
        a: &Trajectory,
        b: &Trajectory,
        mode: RqaMode,
    ) -> Result<RqaResult, RqaError> {
        let distance = DistanceMatrix::between(a, b);
        let recurrence = RecurrenceMatrix::from_distance(
            &distance,
            self.config.rescale,
            self.config.radius,
            self.effective_theiler(mode),
        )?;
        debug!(
            ones = recurrence.ones(),
            rate = recurrence.recurrence_rate(),
            "thresholded"
        );

        let outcome = match stats::compute(
            &recurrence,
            self.config.min_line,
            mode,
            self.effective_theiler(mode),
        ) {
            Ok((stats, histograms)) => StatsOutcome::Computed { stats, histograms },
            Err(reason) => {
                debug!(%reason, "degenerate recurrence matrix");
                StatsOutcome::Degenerate(reason)
            }
        };

        let retained = self.config.retain_distance.then_some(distance);
        Ok(RqaResult::new(mode, recurrence, retained, outcome))
    }
}
