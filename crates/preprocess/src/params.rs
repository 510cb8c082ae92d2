//! Parameters for normalization.

use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, NormalizeResult};

/// Default number of points in a normalized cloud.
pub const DEFAULT_NUM_POINTS: usize = 1024;

/// Parameters for [`normalize_with_rng`](crate::normalize_with_rng).
///
/// # Example
///
/// ```
/// use cloudprep_preprocess::NormalizeParams;
///
/// let params = NormalizeParams::default();
/// assert_eq!(params.num_points, 1024);
///
/// let small = NormalizeParams::default().with_num_points(256);
/// assert_eq!(small.num_points, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeParams {
    /// Number of points in every output cloud. Must be at least 1.
    pub num_points: usize,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_NUM_POINTS,
        }
    }
}

impl NormalizeParams {
    #[must_use]
    pub const fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    pub fn validate(&self) -> NormalizeResult<()> {
        if self.num_points == 0 {
            return Err(NormalizeError::invalid_input("num_points must be at least 1"));
        }
        Ok(())
    }
}
