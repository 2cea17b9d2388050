//! Phase-space trajectory reconstruction.

use crate::error::RqaError;
use crate::series::{MultiSeries, SeriesView};

/// A reconstructed phase-space trajectory: points × dim, row-major.
///
/// Built either by time-delay embedding of a scalar series (point `i`
/// is `[x[i], x[i+lag], ..., x[i+(dim-1)*lag]]`) or directly from the
/// sample rows of a multivariate series.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    data: Vec<f64>,
    dim: usize,
}

impl Trajectory {
    /// Time-delay embed a scalar series.
    ///
    /// The resulting trajectory has `series.len() - (dim - 1) * lag`
    /// points of dimension `dim`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`RqaError::InvalidEmbedding`] | `dim` or `lag` is zero |
    /// | [`RqaError::EmbeddingTooLong`] | `dim * lag` exceeds the series length |
    ///
    /// The `dim * lag <= len` requirement guarantees at least one point:
    /// `len - (dim - 1) * lag >= lag >= 1`.
    pub fn delay(series: SeriesView<'_>, dim: usize, lag: usize) -> Result<Self, RqaError> {
        if dim == 0 || lag == 0 {
            return Err(RqaError::InvalidEmbedding { dim, lag });
        }
        let len = series.len();
        if dim * lag > len {
            return Err(RqaError::EmbeddingTooLong { dim, lag, len });
        }

        let n_points = len - (dim - 1) * lag;
        let values = series.as_slice();
        let mut data = Vec::with_capacity(n_points * dim);
        for i in 0..n_points {
            for d in 0..dim {
                data.push(values[i + d * lag]);
            }
        }
        Ok(Self { data, dim })
    }

    /// Use the sample rows of a multivariate series as trajectory points.
    ///
    /// No delay embedding takes place; the point dimension equals the
    /// channel count.
    #[must_use]
    pub fn from_samples(series: &MultiSeries) -> Self {
        Self {
            data: series.as_slice().to_vec(),
            dim: series.channels(),
        }
    }

    /// Return the number of trajectory points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / self.dim
    }

    /// Return true if the trajectory has no points.
    ///
    /// Both constructors guarantee at least one point, so this always
    /// returns `false` for valid instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the embedding dimension of each point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return point `i` as a coordinate slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[must_use]
    pub fn point(&self, i: usize) -> &[f64] {
        let start = i * self.dim;
        &self.data[start..start + self.dim]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;

    fn view(values: &[f64]) -> SeriesView<'_> {
        SeriesView::new(values).unwrap()
    }

    #[test]
    fn dim_one_is_identity() {
        let s = [1.0, 2.0, 3.0, 4.0];
        let t = Trajectory::delay(view(&s), 1, 1).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.dim(), 1);
        assert_eq!(t.point(2), &[3.0]);
    }

    #[test]
    fn delay_embedding_layout() {
        // dim=2, lag=2 over [0,1,2,3,4]: points (x[i], x[i+2]) for i in 0..3
        let s = [0.0, 1.0, 2.0, 3.0, 4.0];
        let t = Trajectory::delay(view(&s), 2, 2).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.point(0), &[0.0, 2.0]);
        assert_eq!(t.point(1), &[1.0, 3.0]);
        assert_eq!(t.point(2), &[2.0, 4.0]);
    }

    #[test]
    fn trajectory_length_formula() {
        let s: Vec<f64> = (0..10).map(f64::from).collect();
        let t = Trajectory::delay(view(&s), 3, 2).unwrap();
        assert_eq!(t.len(), 10 - (3 - 1) * 2);
        assert_eq!(t.point(0), &[0.0, 2.0, 4.0]);
    }

    #[test]
    fn rejects_zero_dim_or_lag() {
        let s = [1.0, 2.0, 3.0];
        assert!(matches!(
            Trajectory::delay(view(&s), 0, 1),
            Err(RqaError::InvalidEmbedding { dim: 0, lag: 1 })
        ));
        assert!(matches!(
            Trajectory::delay(view(&s), 1, 0),
            Err(RqaError::InvalidEmbedding { dim: 1, lag: 0 })
        ));
    }

    #[test]
    fn rejects_window_longer_than_series() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0];
        let result = Trajectory::delay(view(&s), 3, 2);
        assert!(matches!(
            result,
            Err(RqaError::EmbeddingTooLong {
                dim: 3,
                lag: 2,
                len: 5
            })
        ));
    }

    #[test]
    fn boundary_window_accepted() {
        // dim * lag == len is the largest admissible window.
        let s = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let t = Trajectory::delay(view(&s), 3, 2).unwrap();
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn from_multivariate_samples() {
        let channels = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let m = crate::series::MultiSeries::from_channels(&channels).unwrap();
        let t = Trajectory::from_samples(&m);
        assert_eq!(t.len(), 3);
        assert_eq!(t.dim(), 2);
        assert_eq!(t.point(1), &[2.0, 5.0]);
    }

    #[test]
    fn series_and_view_agree() {
        let s = Series::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let a = Trajectory::delay(s.as_view(), 2, 1).unwrap();
        let b = Trajectory::delay(view(&[1.0, 2.0, 3.0, 4.0]), 2, 1).unwrap();
        assert_eq!(a, b);
    }
}
