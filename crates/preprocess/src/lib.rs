//! Preprocessing for point-cloud classification inputs.
//!
//! The central operation is [`normalize_with_rng`]: resample a cloud of any
//! size to exactly `num_points` points, move its centroid to the origin and
//! scale it so the farthest point lies on the unit sphere.

#![forbid(unsafe_code)]

pub mod batch;
pub mod error;
pub mod normalize;
pub mod params;
pub mod resample;

pub use batch::{normalize_batch, normalize_batch_seeded};
pub use error::{NormalizeError, NormalizeResult};
pub use normalize::{
    normalize, normalize_rows, normalize_seeded, normalize_with_rng, NormalizedCloud,
};
pub use params::{NormalizeParams, DEFAULT_NUM_POINTS};
pub use resample::{resample_indices, SamplingMode};
