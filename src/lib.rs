//! Point-cloud preprocessing for classification datasets.
//!
//! Re-exports the workspace crates under one roof:
//!
//! - [`cloud`]: `PointCloud` storage and bounding boxes.
//! - [`preprocess`]: fixed-size resampling and unit-sphere normalization.
//! - [`dataset`]: JSON-lines records and their introspection.

#![forbid(unsafe_code)]

pub use cloudprep_core as cloud;
pub use cloudprep_dataset as dataset;
pub use cloudprep_preprocess as preprocess;

pub use cloudprep_core::PointCloud;
pub use cloudprep_preprocess::{
    normalize, normalize_rows, normalize_seeded, normalize_with_rng, NormalizeError,
    NormalizeParams, NormalizedCloud,
};
