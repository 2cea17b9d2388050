//! Dense pairwise distance matrix between trajectory points.

use rayon::prelude::*;
use tracing::instrument;

use crate::embed::Trajectory;

/// Dense rows × cols matrix of pairwise Euclidean distances.
///
/// Entry `(i, j)` is the distance between point `i` of the first
/// trajectory and point `j` of the second. Square, symmetric, and
/// zero-diagonal when both trajectories are the same object (auto
/// mode); rectangular in cross mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise Euclidean distances between two trajectories.
    ///
    /// This is the O(rows · cols · dim) dominant cost of the pipeline;
    /// rows are computed in parallel with rayon.
    ///
    /// # Panics
    ///
    /// Panics if the trajectories have different point dimensions. The
    /// analysis entry points always build both sides with the same
    /// embedding, so this indicates misuse of the low-level API.
    #[must_use]
    #[instrument(skip(a, b), fields(rows = a.len(), cols = b.len(), dim = a.dim()))]
    pub fn between(a: &Trajectory, b: &Trajectory) -> Self {
        assert_eq!(
            a.dim(),
            b.dim(),
            "trajectories must share a point dimension"
        );
        let rows = a.len();
        let cols = b.len();

        let mut data = vec![0.0; rows * cols];
        data.par_chunks_mut(cols).enumerate().for_each(|(i, row)| {
            let p = a.point(i);
            for (j, cell) in row.iter_mut().enumerate() {
                let q = b.point(j);
                let sq: f64 = p.iter().zip(q).map(|(x, y)| (x - y).powi(2)).sum();
                *cell = sq.sqrt();
            }
        });

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

    /// Return the distance at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows, "row index {i} out of bounds for {} rows", self.rows);
        assert!(j < self.cols, "column index {j} out of bounds for {} columns", self.cols);
        self.data[i * self.cols + j]
    }

    /// Return the mean distance over all entries.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Return the maximum distance over all entries.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.data.iter().fold(0.0, |acc: f64, &v| acc.max(v))
    }

    /// Return the row-major backing storage.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesView;

    fn traj(values: &[f64], dim: usize, lag: usize) -> Trajectory {
        Trajectory::delay(SeriesView::new(values).unwrap(), dim, lag).unwrap()
    }

    #[test]
    fn auto_matrix_symmetric_zero_diagonal() {
        let t = traj(&[1.0, 3.0, 2.0, 5.0, 4.0], 2, 1);
        let d = DistanceMatrix::between(&t, &t);
        assert!(d.is_square());
        for i in 0..d.rows() {
            assert_eq!(d.get(i, i), 0.0);
            for j in 0..d.cols() {
                assert!((d.get(i, j) - d.get(j, i)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn hand_computed_scalar_distances() {
        let a = traj(&[0.0, 3.0], 1, 1);
        let b = traj(&[4.0], 1, 1);
        let d = DistanceMatrix::between(&a, &b);
        assert_eq!(d.rows(), 2);
        assert_eq!(d.cols(), 1);
        assert!((d.get(0, 0) - 4.0).abs() < 1e-12);
        assert!((d.get(1, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hand_computed_embedded_distance() {
        // dim=2, lag=1: a → [(0,0)], b → [(3,4)]; distance = 5
        let a = traj(&[0.0, 0.0], 2, 1);
        let b = traj(&[3.0, 4.0], 2, 1);
        let d = DistanceMatrix::between(&a, &b);
        assert!((d.get(0, 0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distances_non_negative() {
        let a = traj(&[1.0, -2.0, 3.0, -4.0, 5.0], 2, 2);
        let b = traj(&[-5.0, 4.0, -3.0, 2.0, -1.0], 2, 2);
        let d = DistanceMatrix::between(&a, &b);
        for &v in d.as_slice() {
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn mean_and_max() {
        let a = traj(&[0.0, 3.0], 1, 1);
        let b = traj(&[4.0], 1, 1);
        let d = DistanceMatrix::between(&a, &b);
        assert!((d.mean() - 2.5).abs() < 1e-12);
        assert!((d.max() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rectangular_shape_in_cross_mode() {
        let a = traj(&[1.0, 2.0, 3.0, 4.0, 5.0], 1, 1);
        let b = traj(&[1.0, 2.0, 3.0], 1, 1);
        let d = DistanceMatrix::between(&a, &b);
        assert_eq!(d.rows(), 5);
        assert_eq!(d.cols(), 3);
        assert!(!d.is_square());
    }

    #[test]
    #[should_panic(expected = "point dimension")]
    fn mismatched_dims_panic() {
        let a = traj(&[1.0, 2.0, 3.0], 1, 1);
        let b = traj(&[1.0, 2.0, 3.0], 2, 1);
        let _ = DistanceMatrix::between(&a, &b);
    }
}
