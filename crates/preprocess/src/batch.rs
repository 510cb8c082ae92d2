use cloudprep_core::PointCloud;
use rand::RngCore;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::NormalizeResult;
use crate::normalize::{normalize_seeded, NormalizedCloud};
use crate::params::NormalizeParams;

/// Normalizes every cloud in `clouds` in parallel, seeding from fresh entropy.
///
/// For reproducible results, use [`normalize_batch_seeded`] instead.
pub fn normalize_batch(
    clouds: &[PointCloud],
    params: &NormalizeParams,
) -> Vec<NormalizeResult<NormalizedCloud>> {
    let seed = rand::thread_rng().next_u64();
    normalize_batch_seeded(clouds, params, seed)
}

/// Normalizes every cloud in `clouds` in parallel.
///
/// Each cloud gets its own generator, seeded from `seed` and the cloud's
/// position in the slice, so the output does not depend on how rayon splits
/// the work. Results come back in input order; a failure for one cloud does
/// not affect the others.
pub fn normalize_batch_seeded(
    clouds: &[PointCloud],
    params: &NormalizeParams,
    seed: u64,
) -> Vec<NormalizeResult<NormalizedCloud>> {
    debug!(
        clouds = clouds.len(),
        num_points = params.num_points,
        "normalizing batch"
    );

    clouds
        .par_iter()
        .enumerate()
        .map(|(i, cloud)| {
            let result = normalize_seeded(cloud, params, item_seed(seed, i));
            if let Err(err) = &result {
                warn!(index = i, %err, "cloud could not be normalized");
            }
            result
        })
        .collect()
}

/// Per-item seed; `StdRng::seed_from_u64` scrambles it, so consecutive
/// values give unrelated streams.
fn item_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64)
}
