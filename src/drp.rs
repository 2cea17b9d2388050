//! Diagonal recurrence profile: recurrence rate as a function of lag.

use crate::threshold::RecurrenceMatrix;

/// Recurrence rate per diagonal offset of a recurrence matrix.
///
/// Lags run from `-(rows - 1)` to `cols - 1` in increasing order, one
/// rate per lag (`rows + cols - 1` entries). The profile is a pure
/// function of the matrix; line structure and minimum line lengths play
/// no part.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalProfile {
    lags: Vec<i64>,
    rates: Vec<f64>,
}

impl DiagonalProfile {
    /// Compute the profile of a recurrence matrix.
    #[must_use]
    pub fn from_recurrence(r: &RecurrenceMatrix) -> Self {
        let rows = r.rows() as i64;
        let cols = r.cols() as i64;
        let mut lags = Vec::with_capacity((rows + cols - 1) as usize);
        let mut rates = Vec::with_capacity((rows + cols - 1) as usize);
        for k in -(rows - 1)..=(cols - 1) {
            let ones = r.diagonal(k).filter(|&v| v).count();
            lags.push(k);
            rates.push(ones as f64 / r.diagonal_len(k) as f64);
        }
        Self { lags, rates }
    }

    /// Return the lags in increasing order.
    #[must_use]
    pub fn lags(&self) -> &[i64] {
        &self.lags
    }

    /// Return the recurrence rate per lag, aligned with [`lags`][Self::lags].
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Return the number of lags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lags.len()
    }

    /// Return true if the profile is empty. Always `false` for profiles
    /// built from a recurrence matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lags.is_empty()
    }

    /// Return the rate at `lag`, or `None` when the lag is outside the profile.
    #[must_use]
    pub fn rate_at(&self, lag: i64) -> Option<f64> {
        let first = *self.lags.first()?;
        let idx = usize::try_from(lag - first).ok()?;
        self.rates.get(idx).copied()
    }

    /// Iterate `(lag, rate)` pairs in lag order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.lags.iter().copied().zip(self.rates.iter().copied())
    }

    /// Return a profile restricted to `|lag| <= max_lag`.
    ///
    /// Truncation is a presentation concern and is never applied during
    /// construction; callers opt in.
    #[must_use]
    pub fn truncated(&self, max_lag: i64) -> Self {
        let (lags, rates) = self
            .iter()
            .filter(|(lag, _)| lag.abs() <= max_lag)
            .unzip();
        Self { lags, rates }
    }

    /// Return the `(lag, rate)` pair with the highest rate, or `None`
    /// for an empty profile. Ties resolve to the smallest lag.
    #[must_use]
    pub fn peak(&self) -> Option<(i64, f64)> {
        self.iter()
            .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
    }

    /// Return the mean recurrence rate across all lags.
    #[must_use]
    pub fn mean_rate(&self) -> f64 {
        if self.rates.is_empty() {
            return 0.0;
        }
        self.rates.iter().sum::<f64>() / self.rates.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::embed::Trajectory;
    use crate::series::SeriesView;
    use crate::threshold::{RecurrenceMatrix, RescaleMode};

    fn recurrence(values: &[f64], radius: f64, theiler: usize) -> RecurrenceMatrix {
        let t = Trajectory::delay(SeriesView::new(values).unwrap(), 1, 1).unwrap();
        let d = DistanceMatrix::between(&t, &t);
        RecurrenceMatrix::from_distance(&d, RescaleMode::None, radius, theiler).unwrap()
    }

    #[test]
    fn profile_length_and_order() {
        let r = recurrence(&[1.0, 2.0, 3.0, 4.0], 0.5, 0);
        let p = DiagonalProfile::from_recurrence(&r);
        assert_eq!(p.len(), 7);
        assert_eq!(p.lags(), &[-3, -2, -1, 0, 1, 2, 3]);
    }

    #[test]
    fn lag_zero_is_one_without_theiler() {
        let r = recurrence(&[1.0, 5.0, 2.0, 8.0], 0.0, 0);
        let p = DiagonalProfile::from_recurrence(&r);
        assert_eq!(p.rate_at(0), Some(1.0));
    }

    #[test]
    fn lag_zero_excluded_by_theiler() {
        let r = recurrence(&[1.0, 5.0, 2.0, 8.0], 0.0, 1);
        let p = DiagonalProfile::from_recurrence(&r);
        assert_eq!(p.rate_at(0), Some(0.0));
        assert_eq!(p.rate_at(1), Some(0.0));
        assert_eq!(p.rate_at(-1), Some(0.0));
    }

    #[test]
    fn periodic_series_peaks_at_period_multiples() {
        // Period-3 series: full recurrence on every lag divisible by 3.
        let values: Vec<f64> = (0..12).map(|i| f64::from(i % 3)).collect();
        let r = recurrence(&values, 0.1, 0);
        let p = DiagonalProfile::from_recurrence(&r);
        for (lag, rate) in p.iter() {
            if lag % 3 == 0 {
                assert_eq!(rate, 1.0, "lag {lag}");
            } else {
                assert_eq!(rate, 0.0, "lag {lag}");
            }
        }
    }

    #[test]
    fn truncation_keeps_symmetric_window() {
        let r = recurrence(&[1.0, 2.0, 3.0, 4.0, 5.0], 1.0, 0);
        let p = DiagonalProfile::from_recurrence(&r).truncated(2);
        assert_eq!(p.lags(), &[-2, -1, 0, 1, 2]);
        assert_eq!(p.rate_at(4), None);
    }

    #[test]
    fn peak_and_mean() {
        let r = recurrence(&[1.0, 1.0, 5.0], 0.1, 0);
        let p = DiagonalProfile::from_recurrence(&r);
        // R = [[1,1,0],[1,1,0],[0,0,1]]
        let (lag, rate) = p.peak().unwrap();
        assert_eq!(lag, 0);
        assert_eq!(rate, 1.0);
        assert!(p.mean_rate() > 0.0);
    }

    #[test]
    fn rectangular_profile_bounds() {
        let a = Trajectory::delay(SeriesView::new(&[1.0, 2.0]).unwrap(), 1, 1).unwrap();
        let b = Trajectory::delay(SeriesView::new(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 1, 1).unwrap();
        let d = DistanceMatrix::between(&a, &b);
        let r = RecurrenceMatrix::from_distance(&d, RescaleMode::None, 0.5, 0).unwrap();
        let p = DiagonalProfile::from_recurrence(&r);
        assert_eq!(p.lags(), &[-1, 0, 1, 2, 3]);
        assert_eq!(p.len(), 2 + 4 - 1);
    }
}
