//! Diagonal and vertical line statistics of a recurrence matrix.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::config::RqaMode;
use crate::threshold::RecurrenceMatrix;

/// Scalar RQA metrics derived from one recurrence matrix.
///
/// Conventions, held fixed across the crate:
///
/// - `entropy` is Shannon entropy in nats (natural log) of the
///   normalized histogram of qualifying diagonal line lengths.
/// - `std_line_length` is the population standard deviation.
/// - `divergence` is `1 / maxl_found`, defined as `0.0` when no
///   diagonal line qualifies.
/// - Trends are raw least-squares slopes of per-diagonal recurrence
///   density against offset distance from the main diagonal (per
///   diagonal step, not per mille), over the offsets outside the
///   Theiler band. `0.0` when fewer than two diagonals are available.
/// - Length-like metrics (`maxl_found`, `vmax`, `count_line`) are zero
///   when no line qualifies.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStats {
    /// Fraction of recurrent cells over all cells (%REC).
    pub perc_recur: f64,
    /// Fraction of recurrent points on qualifying diagonal lines (%DET).
    pub perc_determ: f64,
    /// Longest qualifying diagonal line.
    pub maxl_found: usize,
    /// Mean qualifying diagonal line length.
    pub mean_line_length: f64,
    /// Population standard deviation of qualifying diagonal line lengths.
    pub std_line_length: f64,
    /// Number of qualifying diagonal lines.
    pub count_line: usize,
    /// Shannon entropy (nats) of the diagonal line length distribution.
    pub entropy: f64,
    /// Fraction of recurrent points on qualifying vertical lines (%LAM).
    pub laminarity: f64,
    /// Mean qualifying vertical line length (trapping time).
    pub trapping_time: f64,
    /// Longest qualifying vertical line.
    pub vmax: usize,
    /// `1 / maxl_found`, or `0.0` when `maxl_found` is zero.
    pub divergence: f64,
    /// Recurrence-density trend over diagonals below the main diagonal.
    pub trend_lower_diag: f64,
    /// Recurrence-density trend over diagonals above the main diagonal.
    pub trend_upper_diag: f64,
}

/// Qualifying run lengths retained for inspection alongside [`LineStats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHistograms {
    /// Lengths of all qualifying diagonal lines, in scan order.
    pub diagonal: Vec<usize>,
    /// Lengths of all qualifying vertical lines, in scan order.
    pub vertical: Vec<usize>,
}

/// Why a recurrence matrix yields no line statistics.
///
/// Degeneracy is a valid analysis outcome for short or non-recurrent
/// series, not an error: the recurrence matrix itself is still
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// The matrix contains no recurrent points.
    NoRecurrentPoints,
    /// No diagonal or column is long enough to hold a qualifying line.
    TooShortForLines {
        /// The configured minimum line length.
        min_line: usize,
        /// The longest line the matrix could hold.
        longest_possible: usize,
    },
}

impl std::fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRecurrentPoints => write!(f, "recurrence matrix has no recurrent points"),
            Self::TooShortForLines {
                min_line,
                longest_possible,
            } => write!(
                f,
                "matrix holds lines of at most {longest_possible}, below minimum {min_line}"
            ),
        }
    }
}

/// Result of scanning one diagonal or column for contiguous runs.
struct RunScan {
    ones: usize,
    qualifying: Vec<usize>,
}

/// Collect contiguous runs of `true` cells, keeping those of length >= `min_line`.
fn scan_runs(cells: impl Iterator<Item = bool>, min_line: usize) -> RunScan {
    let mut ones = 0;
    let mut qualifying = Vec::new();
    let mut run = 0usize;
    for cell in cells {
        if cell {
            ones += 1;
            run += 1;
        } else {
            if run >= min_line {
                qualifying.push(run);
            }
            run = 0;
        }
    }
    if run >= min_line {
        qualifying.push(run);
    }
    RunScan { ones, qualifying }
}

/// Least-squares slope of `y` against `x`. Zero when underdetermined.
fn regression_slope(points: &[(f64, f64)]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for &(x, y) in points {
        num += (x - mean_x) * (y - mean_y);
        den += (x - mean_x) * (x - mean_x);
    }
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Shannon entropy in nats of the normalized histogram of `lengths`.
fn line_entropy(lengths: &[usize]) -> f64 {
    if lengths.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &len in lengths {
        *counts.entry(len).or_insert(0) += 1;
    }
    let total = lengths.len() as f64;
    let mut entropy = 0.0;
    for &count in counts.values() {
        let p = count as f64 / total;
        entropy -= p * p.ln();
    }
    entropy
}

/// Scan a recurrence matrix for diagonal and vertical line structures.
///
/// `theiler` is the window already applied during thresholding; it only
/// steers which diagonals enter the trend regressions. In [`RqaMode::Auto`]
/// the main diagonal is excluded from the diagonal-line scan; in
/// [`RqaMode::Cross`] every diagonal participates.
#[instrument(skip(r), fields(rows = r.rows(), cols = r.cols(), min_line))]
pub(crate) fn compute(
    r: &RecurrenceMatrix,
    min_line: usize,
    mode: RqaMode,
    theiler: usize,
) -> Result<(LineStats, LineHistograms), Degeneracy> {
    let rows = r.rows();
    let cols = r.cols();
    let total_ones = r.ones();
    let perc_recur = total_ones as f64 / (rows * cols) as f64;

    if total_ones == 0 {
        return Err(Degeneracy::NoRecurrentPoints);
    }
    let longest_possible = rows.min(cols);
    if longest_possible < min_line {
        return Err(Degeneracy::TooShortForLines {
            min_line,
            longest_possible,
        });
    }

    // Diagonal pass. Offsets are independent; scans run in parallel and
    // reduce into commutative accumulators afterwards.
    let offsets: Vec<i64> = (-(rows as i64 - 1)..=(cols as i64 - 1))
        .filter(|&k| !(mode == RqaMode::Auto && k == 0))
        .collect();
    let diag_scans: Vec<(i64, RunScan)> = offsets
        .par_iter()
        .map(|&k| (k, scan_runs(r.diagonal(k), min_line)))
        .collect();

    let diagonal: Vec<usize> = diag_scans
        .iter()
        .flat_map(|(_, scan)| scan.qualifying.iter().copied())
        .collect();
    let diag_points: usize = diagonal.iter().sum();
    let maxl_found = diagonal.iter().copied().max().unwrap_or(0);
    let count_line = diagonal.len();
    let mean_line_length = if count_line > 0 {
        diag_points as f64 / count_line as f64
    } else {
        0.0
    };
    let std_line_length = if count_line > 0 {
        let var = diagonal
            .iter()
            .map(|&l| {
                let d = l as f64 - mean_line_length;
                d * d
            })
            .sum::<f64>()
            / count_line as f64;
        var.sqrt()
    } else {
        0.0
    };

    // Trend regressions: per-diagonal density against distance from the
    // main diagonal, one fit per triangle, skipping the Theiler band.
    let trend_points = |side: i64| -> Vec<(f64, f64)> {
        diag_scans
            .iter()
            .filter(|(k, _)| k.signum() == side && k.unsigned_abs() as usize > theiler)
            .map(|(k, scan)| {
                let len = r.diagonal_len(*k) as f64;
                (k.unsigned_abs() as f64, scan.ones as f64 / len)
            })
            .collect()
    };
    let trend_upper_diag = regression_slope(&trend_points(1));
    let trend_lower_diag = regression_slope(&trend_points(-1));

    // Vertical pass.
    let vert_scans: Vec<RunScan> = (0..cols)
        .into_par_iter()
        .map(|j| scan_runs(r.column(j), min_line))
        .collect();
    let vertical: Vec<usize> = vert_scans
        .iter()
        .flat_map(|scan| scan.qualifying.iter().copied())
        .collect();
    let vert_points: usize = vertical.iter().sum();
    let vmax = vertical.iter().copied().max().unwrap_or(0);
    let trapping_time = if vertical.is_empty() {
        0.0
    } else {
        vert_points as f64 / vertical.len() as f64
    };

    let divergence = if maxl_found > 0 {
        1.0 / maxl_found as f64
    } else {
        0.0
    };

    debug!(
        recurrent = total_ones,
        diag_lines = count_line,
        vert_lines = vertical.len(),
        "line scan complete"
    );

    let stats = LineStats {
        perc_recur,
        perc_determ: diag_points as f64 / total_ones as f64,
        maxl_found,
        mean_line_length,
        std_line_length,
        count_line,
        entropy: line_entropy(&diagonal),
        laminarity: vert_points as f64 / total_ones as f64,
        trapping_time,
        vmax,
        divergence,
        trend_lower_diag,
        trend_upper_diag,
    };
    Ok((stats, LineHistograms { diagonal, vertical }))
}
