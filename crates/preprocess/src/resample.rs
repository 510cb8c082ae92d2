use rand::seq::index;
use rand::Rng;

use crate::error::{NormalizeError, NormalizeResult};

/// How [`resample_indices`] reaches the target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// More points than needed: distinct indices, drawn without replacement.
    Subsample,
    /// Fewer points than needed: indices drawn with replacement.
    Upsample,
    /// Exact size: identity order.
    PassThrough,
}

impl SamplingMode {
    pub fn for_sizes(len: usize, num_points: usize) -> Self {
        match len.cmp(&num_points) {
            std::cmp::Ordering::Greater => Self::Subsample,
            std::cmp::Ordering::Less => Self::Upsample,
            std::cmp::Ordering::Equal => Self::PassThrough,
        }
    }
}

/// Picks `num_points` indices into a cloud of `len` points.
///
/// - `len > num_points`: uniform sample without replacement, so no index
///   repeats.
/// - `len < num_points`: each index drawn uniformly and independently, so
///   repeats are expected.
/// - `len == num_points`: `0..len` unchanged.
pub fn resample_indices<R: Rng + ?Sized>(
    len: usize,
    num_points: usize,
    rng: &mut R,
) -> NormalizeResult<Vec<usize>> {
    if len == 0 {
        return Err(NormalizeError::invalid_input("cannot resample an empty point cloud"));
    }
    if num_points == 0 {
        return Err(NormalizeError::invalid_input("num_points must be at least 1"));
    }

    let indices = match SamplingMode::for_sizes(len, num_points) {
        SamplingMode::Subsample => index::sample(rng, len, num_points).into_vec(),
        SamplingMode::Upsample => (0..num_points).map(|_| rng.gen_range(0..len)).collect(),
        SamplingMode::PassThrough => (0..len).collect(),
    };

    Ok(indices)
}
