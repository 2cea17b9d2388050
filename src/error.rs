//! Error types for RQA configuration and input validation.

/// Errors from RQA configuration and input validation.
///
/// Every variant is raised synchronously, before any matrix is
/// allocated. A degenerate but well-formed analysis (empty recurrence
/// matrix, matrix too small for the requested minimum line length) is
/// not an error — see [`crate::stats::Degeneracy`].
#[derive(Debug, thiserror::Error)]
pub enum RqaError {
    /// Returned when an empty slice is provided as a time series.
    #[error("time series must be non-empty")]
    EmptySeries,

    /// Returned when a time series contains NaN, infinity, or negative infinity.
    #[error("time series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when a multivariate sample contains a non-finite value.
    #[error("non-finite value at sample {sample}, channel {channel}")]
    NonFiniteSample {
        /// Zero-based index of the offending sample.
        sample: usize,
        /// Zero-based index of the offending channel.
        channel: usize,
    },

    /// Returned when multivariate rows (or channels) have inconsistent lengths.
    #[error("sample {sample} has {got} channels, expected {expected}")]
    RaggedChannels {
        /// The expected channel count (taken from the first sample).
        expected: usize,
        /// The channel count actually found.
        got: usize,
        /// Zero-based index of the offending sample.
        sample: usize,
    },

    /// Returned when a multivariate analysis is requested with fewer than two channels.
    #[error("multivariate analysis requires at least 2 channels, got {channels}")]
    TooFewChannels {
        /// The channel count provided.
        channels: usize,
    },

    /// Returned when the two sides of a multivariate cross analysis disagree on channels.
    #[error("cross analysis channel mismatch: {left} vs {right}")]
    ChannelMismatch {
        /// Channel count of the first series.
        left: usize,
        /// Channel count of the second series.
        right: usize,
    },

    /// Returned when the recurrence radius is negative or non-finite.
    #[error("radius must be finite and >= 0, got {radius}")]
    InvalidRadius {
        /// The invalid radius provided.
        radius: f64,
    },

    /// Returned when the embedding dimension or delay is zero.
    #[error("embedding dimension and delay must be at least 1, got dim={dim}, lag={lag}")]
    InvalidEmbedding {
        /// The embedding dimension provided.
        dim: usize,
        /// The embedding delay provided.
        lag: usize,
    },

    /// Returned when the minimum line length is zero.
    #[error("minimum line length must be at least 1, got {min_line}")]
    InvalidMinLine {
        /// The invalid minimum line length provided.
        min_line: usize,
    },

    /// Returned when the embedding window does not fit inside the series.
    ///
    /// The delay embedding needs `dim * lag` samples; a shorter series
    /// would produce an empty (or negative-length) trajectory.
    #[error("embedding window dim={dim} * lag={lag} exceeds series length {len}")]
    EmbeddingTooLong {
        /// The embedding dimension requested.
        dim: usize,
        /// The embedding delay requested.
        lag: usize,
        /// The length of the offending series.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_values() {
        let err = RqaError::EmbeddingTooLong {
            dim: 3,
            lag: 4,
            len: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("dim=3"), "message was: {msg}");
        assert!(msg.contains("10"), "message was: {msg}");

        let err = RqaError::InvalidRadius { radius: -0.5 };
        assert!(err.to_string().contains("-0.5"));
    }
}
