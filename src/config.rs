//! Analysis configuration with construction-time validation.

use crate::error::RqaError;
use crate::threshold::RescaleMode;

/// Whether a recurrence matrix compares a series with itself or with another.
///
/// Auto mode excludes the main diagonal from the diagonal-line scan
/// (trivial self-matches) and honors the configured Theiler window;
/// cross mode scans every diagonal and always runs with a Theiler
/// window of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RqaMode {
    /// Recurrence of a series with itself.
    Auto,
    /// Cross recurrence between two series.
    Cross,
}

/// Configuration for an RQA run.
///
/// Construct via [`RqaConfig::new`], then chain `with_*` methods. Every
/// parameter is validated where it is set; an [`Rqa`](crate::Rqa)
/// built from a config never re-validates.
///
/// # Defaults
///
/// | Parameter         | Default |
/// |-------------------|---------|
/// | `embedding_dim`   | 1       |
/// | `delay`           | 1       |
/// | `rescale`         | `None`  |
/// | `theiler`         | 1       |
/// | `min_line`        | 2       |
/// | `retain_distance` | `false` |
#[derive(Debug, Clone, PartialEq)]
pub struct RqaConfig {
    pub(crate) radius: f64,
    pub(crate) embedding_dim: usize,
    pub(crate) delay: usize,
    pub(crate) rescale: RescaleMode,
    pub(crate) theiler: usize,
    pub(crate) min_line: usize,
    pub(crate) retain_distance: bool,
}

impl RqaConfig {
    /// Create a config with the given recurrence radius.
    ///
    /// # Errors
    ///
    /// Returns [`RqaError::InvalidRadius`] if `radius` is negative, NaN,
    /// or infinite.
    pub fn new(radius: f64) -> Result<Self, RqaError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(RqaError::InvalidRadius { radius });
        }
        Ok(Self {
            radius,
            embedding_dim: 1,
            delay: 1,
            rescale: RescaleMode::None,
            theiler: 1,
            min_line: 2,
            retain_distance: false,
        })
    }

    /// Set the delay-embedding dimension and lag.
    ///
    /// Ignored by the multivariate entry points, which use raw sample
    /// rows as phase-space points.
    ///
    /// # Errors
    ///
    /// Returns [`RqaError::InvalidEmbedding`] if either value is zero.
    pub fn with_embedding(mut self, dim: usize, lag: usize) -> Result<Self, RqaError> {
        if dim == 0 || lag == 0 {
            return Err(RqaError::InvalidEmbedding { dim, lag });
        }
        self.embedding_dim = dim;
        self.delay = lag;
        Ok(self)
    }

    /// Set the distance rescaling applied before thresholding.
    #[must_use]
    pub fn with_rescale(mut self, rescale: RescaleMode) -> Self {
        self.rescale = rescale;
        self
    }

    /// Set the Theiler window (diagonals excluded around the main
    /// diagonal in auto mode; cross mode always behaves as zero).
    #[must_use]
    pub fn with_theiler(mut self, theiler: usize) -> Self {
        self.theiler = theiler;
        self
    }

    /// Set the minimum run length for a diagonal or vertical line to
    /// count toward line-based metrics.
    ///
    /// # Errors
    ///
    /// Returns [`RqaError::InvalidMinLine`] if `min_line` is zero.
    pub fn with_min_line(mut self, min_line: usize) -> Result<Self, RqaError> {
        if min_line == 0 {
            return Err(RqaError::InvalidMinLine { min_line });
        }
        self.min_line = min_line;
        Ok(self)
    }

    /// Keep the raw distance matrix on the result for inspection.
    #[must_use]
    pub fn with_retained_distance(mut self, retain: bool) -> Self {
        self.retain_distance = retain;
        self
    }

    // --- Getters ---

    /// Return the recurrence radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Return the embedding dimension.
    #[must_use]
    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    /// Return the embedding delay.
    #[must_use]
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Return the rescale mode.
    #[must_use]
    pub fn rescale(&self) -> RescaleMode {
        self.rescale
    }

    /// Return the Theiler window.
    #[must_use]
    pub fn theiler(&self) -> usize {
        self.theiler
    }

    /// Return the minimum line length.
    #[must_use]
    pub fn min_line(&self) -> usize {
        self.min_line
    }

    /// Return whether the distance matrix is retained on results.
    #[must_use]
    pub fn retain_distance(&self) -> bool {
        self.retain_distance
    }
}
