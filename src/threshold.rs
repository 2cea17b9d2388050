//! Recurrence thresholding: rescale, radius cutoff, Theiler band.

use tracing::instrument;

use crate::distance::DistanceMatrix;
use crate::error::RqaError;

/// How to rescale distances before applying the radius cutoff.
///
/// Rescaling statistics are taken from the unthresholded matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RescaleMode {
    /// Threshold raw distances.
    #[default]
    None,
    /// Divide every distance by the matrix mean distance.
    Mean,
    /// Divide every distance by the matrix maximum distance.
    Max,
}

/// Dense binary recurrence matrix.
///
/// Derived from exactly one [`DistanceMatrix`] and one
/// `(rescale, radius, theiler)` configuration, and never mutated
/// afterwards. A cell is recurrent iff its rescaled distance is within
/// the radius and it lies outside the Theiler band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl RecurrenceMatrix {
    /// Threshold a distance matrix into a recurrence matrix.
    ///
    /// `theiler` zeroes every cell within `theiler` steps of the main
    /// diagonal (inclusive, both directions). The band only applies to
    /// square matrices: a rectangular matrix is a cross-recurrence plot
    /// and has no self-match diagonal to exclude, so the parameter is
    /// ignored there.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`RqaError::InvalidRadius`] | `radius` is negative, NaN, or infinite |
    #[instrument(skip(distance), fields(rows = distance.rows(), cols = distance.cols(), radius))]
    pub fn from_distance(
        distance: &DistanceMatrix,
        rescale: RescaleMode,
        radius: f64,
        theiler: usize,
    ) -> Result<Self, RqaError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(RqaError::InvalidRadius { radius });
        }

        let scale = match rescale {
            RescaleMode::None => 1.0,
            RescaleMode::Mean => distance.mean(),
            RescaleMode::Max => distance.max(),
        };
        // A zero scale means an all-zero matrix; leave distances as-is
        // rather than dividing by zero.
        let scale = if scale > 0.0 { scale } else { 1.0 };

        let rows = distance.rows();
        let cols = distance.cols();
        let band = if distance.is_square() {
            Some(theiler as i64)
        } else {
            None
        };

        let data = distance
            .as_slice()
            .iter()
            .enumerate()
            .map(|(idx, &d)| {
                if let Some(tw) = band {
                    let i = (idx / cols) as i64;
                    let j = (idx % cols) as i64;
                    if (i - j).abs() <= tw {
                        return false;
                    }
                }
                d / scale <= radius
            })
            .collect();

        Ok(Self { rows, cols, data })
    }

    /// Create a recurrence matrix from pre-computed cells.
    ///
    /// `data` is row-major and must contain exactly `rows * cols` cells.
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Return the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return true if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Return the cell at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> bool {
        assert!(i < self.rows, "row index {i} out of bounds for {} rows", self.rows);
        assert!(j < self.cols, "column index {j} out of bounds for {} columns", self.cols);
        self.data[i * self.cols + j]
    }

    /// Return the number of recurrent cells.
    #[must_use]
    pub fn ones(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Return the fraction of recurrent cells over all cells.
    #[must_use]
    pub fn recurrence_rate(&self) -> f64 {
        self.ones() as f64 / (self.rows * self.cols) as f64
    }

    /// Number of cells on diagonal offset `k` (`k = j - i`).
    ///
    /// Offsets range over `-(rows - 1) ..= cols - 1`.
    #[must_use]
    pub fn diagonal_len(&self, k: i64) -> usize {
        let rows = self.rows as i64;
        let cols = self.cols as i64;
        debug_assert!(k > -rows && k < cols);
        if k >= 0 {
            (cols - k).min(rows) as usize
        } else {
            (rows + k).min(cols) as usize
        }
    }

    /// Iterate the cells of diagonal offset `k` in increasing row order.
    pub(crate) fn diagonal(&self, k: i64) -> impl Iterator<Item = bool> + '_ {
        let (start_i, start_j) = if k >= 0 { (0, k as usize) } else { ((-k) as usize, 0) };
        let len = self.diagonal_len(k);
        (0..len).map(move |t| self.data[(start_i + t) * self.cols + (start_j + t)])
    }

    /// Iterate the cells of column `j` in increasing row order.
    pub(crate) fn column(&self, j: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.rows).map(move |i| self.data[i * self.cols + j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::Trajectory;
    use crate::series::SeriesView;

    fn dist(values: &[f64]) -> DistanceMatrix {
        let t = Trajectory::delay(SeriesView::new(values).unwrap(), 1, 1).unwrap();
        DistanceMatrix::between(&t, &t)
    }

    #[test]
    fn rejects_negative_radius() {
        let d = dist(&[1.0, 2.0, 3.0]);
        let result = RecurrenceMatrix::from_distance(&d, RescaleMode::None, -1.0, 0);
        assert!(matches!(result, Err(RqaError::InvalidRadius { .. })));
    }

    #[test]
    fn rejects_nan_radius() {
        let d = dist(&[1.0, 2.0, 3.0]);
        let result = RecurrenceMatrix::from_distance(&d, RescaleMode::None, f64::NAN, 0);
        assert!(matches!(result, Err(RqaError::InvalidRadius { .. })));
    }

    #[test]
    fn raw_threshold_inclusive() {
        let d = dist(&[0.0, 1.0, 3.0]);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::None, 1.0, 0).unwrap();
        assert!(r.get(0, 0));
        assert!(r.get(0, 1), "distance exactly equal to radius is recurrent");
        assert!(!r.get(0, 2));
    }

    #[test]
    fn max_rescale_makes_radius_one_all_recurrent() {
        let d = dist(&[0.0, 2.0, 7.0, 1.0]);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::Max, 1.0, 0).unwrap();
        assert_eq!(r.ones(), 16);
    }

    #[test]
    fn mean_rescale_uses_unthresholded_mean() {
        let d = dist(&[0.0, 10.0]);
        // mean of [0,10,10,0] is 5; rescaled off-diagonal = 2
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::Mean, 2.0, 0).unwrap();
        assert_eq!(r.ones(), 4);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::Mean, 1.9, 0).unwrap();
        assert_eq!(r.ones(), 2);
    }

    #[test]
    fn theiler_zeroes_band_inclusive() {
        let d = dist(&[1.0, 1.0, 1.0, 1.0]);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::None, 0.5, 1).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = (i as i64 - j as i64).abs() > 1;
                assert_eq!(r.get(i, j), expected, "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn theiler_ignored_for_rectangular_matrix() {
        let a = Trajectory::delay(SeriesView::new(&[1.0, 1.0, 1.0]).unwrap(), 1, 1).unwrap();
        let b = Trajectory::delay(SeriesView::new(&[1.0, 1.0]).unwrap(), 1, 1).unwrap();
        let d = DistanceMatrix::between(&a, &b);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::None, 0.5, 3).unwrap();
        assert_eq!(r.ones(), 6, "cross matrix must keep all cells");
    }

    #[test]
    fn thresholding_is_idempotent() {
        let d = dist(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
        let a = RecurrenceMatrix::from_distance(&d, RescaleMode::Mean, 0.8, 1).unwrap();
        let b = RecurrenceMatrix::from_distance(&d, RescaleMode::Mean, 0.8, 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn constant_series_fully_recurrent_at_zero_radius() {
        let d = dist(&[2.0, 2.0, 2.0, 2.0]);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::None, 0.0, 0).unwrap();
        assert!((r.recurrence_rate() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_zero_matrix_survives_max_rescale() {
        let d = dist(&[5.0, 5.0, 5.0]);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::Max, 0.0, 0).unwrap();
        assert_eq!(r.ones(), 9);
    }

    #[test]
    fn diagonal_lengths() {
        let a = Trajectory::delay(SeriesView::new(&[1.0; 4]).unwrap(), 1, 1).unwrap();
        let b = Trajectory::delay(SeriesView::new(&[1.0; 3]).unwrap(), 1, 1).unwrap();
        let d = DistanceMatrix::between(&a, &b);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::None, 1.0, 0).unwrap();
        // 4x3 matrix: offsets -3..=2
        assert_eq!(r.diagonal_len(-3), 1);
        assert_eq!(r.diagonal_len(-1), 3);
        assert_eq!(r.diagonal_len(0), 3);
        assert_eq!(r.diagonal_len(2), 1);
        let total: usize = (-3..=2).map(|k| r.diagonal_len(k)).sum();
        assert_eq!(total, 12);
    }

    #[test]
    fn diagonal_and_column_iteration() {
        let d = dist(&[0.0, 0.0, 5.0]);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::None, 1.0, 0).unwrap();
        // R = [[1,1,0],[1,1,0],[0,0,1]]
        let diag0: Vec<bool> = r.diagonal(0).collect();
        assert_eq!(diag0, vec![true, true, true]);
        let diag1: Vec<bool> = r.diagonal(1).collect();
        assert_eq!(diag1, vec![true, false]);
        let col0: Vec<bool> = r.column(0).collect();
        assert_eq!(col0, vec![true, true, false]);
    }
}
