//! Recurrence quantification analysis.
//!
//! Pure math library — zero I/O. Reconstructs phase-space trajectories
//! from one or two (possibly multivariate) time series, computes the
//! pairwise Euclidean distance matrix, thresholds it into a binary
//! recurrence matrix, and derives diagonal/vertical line statistics
//! (determinism, laminarity, entropy, trapping time, trends) and
//! diagonal recurrence profiles.
//!
//! Normalization, plotting, and persistence are caller concerns; the
//! crate takes validated series in and hands structured results back.
//!
//! ```
//! use echo_rqa::{RescaleMode, Rqa, RqaConfig, Series};
//!
//! let values: Vec<f64> = (0..100).map(|i| (f64::from(i) * 0.3).sin()).collect();
//! let series = Series::new(values)?;
//!
//! let config = RqaConfig::new(0.2)?
//!     .with_embedding(2, 1)?
//!     .with_rescale(RescaleMode::Mean)
//!     .with_theiler(1)
//!     .with_min_line(2)?;
//! let result = Rqa::new(config).auto(&series)?;
//!
//! if let Some(stats) = result.stats() {
//!     assert!(stats.perc_recur > 0.0);
//!     assert!(stats.perc_determ <= 1.0);
//! }
//! # Ok::<(), echo_rqa::RqaError>(())
//! ```

mod config;
mod distance;
mod drp;
mod embed;
mod error;
mod result;
mod rqa;
mod series;
mod stats;
mod threshold;

pub use config::{RqaConfig, RqaMode};
pub use distance::DistanceMatrix;
pub use drp::DiagonalProfile;
pub use embed::Trajectory;
pub use error::RqaError;
pub use result::{RqaResult, StatsOutcome};
pub use rqa::Rqa;
pub use series::{MultiSeries, Series, SeriesView};
pub use stats::{Degeneracy, LineHistograms, LineStats};
pub use threshold::{RecurrenceMatrix, RescaleMode};
