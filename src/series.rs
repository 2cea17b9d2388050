//! Input series types with validation guarantees.

use std::ops::Index;

use crate::error::RqaError;

/// Owned, validated scalar time series. Guaranteed non-empty with all finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series(Vec<f64>);

impl Series {
    /// Create a new series, validating that it is non-empty and all values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`RqaError::EmptySeries`] | `values` is empty |
    /// | [`RqaError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(values: Vec<f64>) -> Result<Self, RqaError> {
        if values.is_empty() {
            return Err(RqaError::EmptySeries);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(RqaError::NonFiniteValue { index });
        }
        Ok(Self(values))
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> SeriesView<'_> {
        SeriesView::new_unchecked(&self.0)
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the series has no samples.
    ///
    /// A [`Series`] constructed via [`Series::new`] is always non-empty, so
    /// this always returns `false` for valid instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = RqaError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

/// Borrowed, validated view into a scalar series. Zero-copy reference.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a>(&'a [f64]);

impl<'a> SeriesView<'a> {
    /// Create a new view, validating that the slice is non-empty and all values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`RqaError::EmptySeries`] | `slice` is empty |
    /// | [`RqaError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(slice: &'a [f64]) -> Result<Self, RqaError> {
        if slice.is_empty() {
            return Err(RqaError::EmptySeries);
        }
        if let Some(index) = slice.iter().position(|v| !v.is_finite()) {
            return Err(RqaError::NonFiniteValue { index });
        }
        Ok(Self(slice))
    }

    /// Create a view without validation. For internal use where data is already validated.
    pub(crate) fn new_unchecked(slice: &'a [f64]) -> Self {
        Self(slice)
    }

    /// Return the underlying slice.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.0
    }

    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the view has no samples. Always `false` for validated views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<usize> for SeriesView<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[f64]> for SeriesView<'_> {
    fn as_ref(&self) -> &[f64] {
        self.0
    }
}

/// Owned, validated multivariate series: samples × channels, row-major.
///
/// Every sample carries the same number of channels and all values are
/// finite. Used by the multivariate analysis entry points, where each
/// sample row is a phase-space point in its own right (no delay
/// embedding).
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSeries {
    data: Vec<f64>,
    channels: usize,
}

impl MultiSeries {
    /// Build from per-sample rows (`rows[t][c]` = channel `c` at time `t`).
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`RqaError::EmptySeries`] | `rows` is empty |
    /// | [`RqaError::TooFewChannels`] | Rows carry fewer than 2 channels |
    /// | [`RqaError::RaggedChannels`] | Rows have inconsistent widths |
    /// | [`RqaError::NonFiniteSample`] | Any value is NaN or infinite |
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, RqaError> {
        if rows.is_empty() {
            return Err(RqaError::EmptySeries);
        }
        let channels = rows[0].len();
        if channels < 2 {
            return Err(RqaError::TooFewChannels { channels });
        }
        let mut data = Vec::with_capacity(rows.len() * channels);
        for (sample, row) in rows.iter().enumerate() {
            if row.len() != channels {
                return Err(RqaError::RaggedChannels {
                    expected: channels,
                    got: row.len(),
                    sample,
                });
            }
            if let Some(channel) = row.iter().position(|v| !v.is_finite()) {
                return Err(RqaError::NonFiniteSample { sample, channel });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, channels })
    }

    /// Build from per-channel columns (`channels[c][t]` = channel `c` at time `t`).
    ///
    /// Column-stacks the channels into row-major sample order.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`MultiSeries::from_rows`]; [`RqaError::RaggedChannels`]
    /// is raised when two channels have different lengths.
    pub fn from_channels(channels: &[Vec<f64>]) -> Result<Self, RqaError> {
        if channels.len() < 2 {
            return Err(RqaError::TooFewChannels {
                channels: channels.len(),
            });
        }
        let n = channels[0].len();
        if n == 0 {
            return Err(RqaError::EmptySeries);
        }
        for (c, col) in channels.iter().enumerate() {
            if col.len() != n {
                return Err(RqaError::RaggedChannels {
                    expected: n,
                    got: col.len(),
                    sample: c,
                });
            }
        }
        let width = channels.len();
        let mut data = Vec::with_capacity(n * width);
        for t in 0..n {
            for (channel, col) in channels.iter().enumerate() {
                let v = col[t];
                if !v.is_finite() {
                    return Err(RqaError::NonFiniteSample { sample: t, channel });
                }
                data.push(v);
            }
        }
        Ok(Self {
            data,
            channels: width,
        })
    }

    /// Return the number of samples (time steps).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / self.channels
    }

    /// Return true if the series has no samples. Always `false` for validated instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the number of channels per sample.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Return sample `t` as a channel slice.
    ///
    /// # Panics
    ///
    /// Panics if `t >= len()`.
    #[must_use]
    pub fn sample(&self, t: usize) -> &[f64] {
        let start = t * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Return the row-major backing storage.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
