//! Error types for point-cloud normalization.

use thiserror::Error;

/// Result type alias for normalization operations.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Errors that can occur while normalizing a point cloud.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Empty or malformed input, or an invalid parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Every sampled point sits at the same location, so there is no scale
    /// to divide by.
    #[error("degenerate geometry: all {num_points} sampled points coincide")]
    DegenerateGeometry { num_points: usize },
}

impl NormalizeError {
    #[must_use]
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput(details.into())
    }

    #[must_use]
    pub const fn degenerate(num_points: usize) -> Self {
        Self::DegenerateGeometry { num_points }
    }

    /// Whether this error comes from the data's shape rather than from a
    /// contract violation by the caller.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }
}
