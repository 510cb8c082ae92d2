use cloudprep_core::PointCloud;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::error::{NormalizeError, NormalizeResult};
use crate::params::NormalizeParams;
use crate::resample::{resample_indices, SamplingMode};

/// A resampled cloud centered on the origin and scaled into the unit sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCloud {
    /// Output points, exactly `num_points` of them.
    pub cloud: PointCloud,
    /// For each output point, the index of the input point it came from.
    pub source_indices: Vec<usize>,
    /// Mean of the sampled input points, subtracted before scaling.
    pub centroid: [f64; 3],
    /// Largest centered distance from the origin, divided out of every point.
    pub scale: f64,
}

impl NormalizedCloud {
    pub fn len(&self) -> usize {
        self.cloud.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloud.is_empty()
    }

    /// Maps an output point back to input coordinates.
    pub fn denormalize(&self, point: [f32; 3]) -> [f32; 3] {
        let p = to_vector(point) * self.scale + Vector3::from(self.centroid);
        [p.x as f32, p.y as f32, p.z as f32]
    }
}

/// Normalizes `cloud` with a generator seeded from fresh entropy.
///
/// Use [`normalize_seeded`] or [`normalize_with_rng`] for reproducible output.
pub fn normalize(cloud: &PointCloud, params: &NormalizeParams) -> NormalizeResult<NormalizedCloud> {
    let seed = rand::thread_rng().next_u64();
    normalize_seeded(cloud, params, seed)
}

/// Normalizes `cloud` with a `StdRng` seeded from `seed`. Identical inputs and
/// seeds give identical output.
pub fn normalize_seeded(
    cloud: &PointCloud,
    params: &NormalizeParams,
    seed: u64,
) -> NormalizeResult<NormalizedCloud> {
    let mut rng = StdRng::seed_from_u64(seed);
    normalize_with_rng(cloud, params, &mut rng)
}

/// Resamples `cloud` to `params.num_points` points, subtracts the centroid of
/// the sampled points and divides by their largest distance from it.
///
/// # Algorithm
///
/// 1. Pick indices with [`resample_indices`].
/// 2. Average the picked points (in `f64`) to get the centroid.
/// 3. Subtract the centroid and find the maximum Euclidean norm.
/// 4. Divide every centered point by that norm.
///
/// # Errors
///
/// - [`NormalizeError::InvalidInput`] if the cloud is empty, holds a NaN or
///   infinite coordinate, or `num_points` is zero.
/// - [`NormalizeError::DegenerateGeometry`] if every sampled point lies at the
///   same position.
pub fn normalize_with_rng<R: Rng + ?Sized>(
    cloud: &PointCloud,
    params: &NormalizeParams,
    rng: &mut R,
) -> NormalizeResult<NormalizedCloud> {
    params.validate()?;
    if cloud.is_empty() {
        return Err(NormalizeError::invalid_input("point cloud is empty"));
    }
    if !cloud.is_finite() {
        return Err(NormalizeError::invalid_input(
            "point cloud contains NaN or infinite coordinates",
        ));
    }

    let mode = SamplingMode::for_sizes(cloud.len(), params.num_points);
    let source_indices = resample_indices(cloud.len(), params.num_points, rng)?;
    debug!(
        input = cloud.len(),
        output = params.num_points,
        ?mode,
        "resampled point cloud"
    );

    let sampled: Vec<Vector3<f64>> = cloud
        .select(&source_indices)
        .iter_points()
        .map(to_vector)
        .collect();

    if sampled.iter().all(|p| *p == sampled[0]) {
        return Err(NormalizeError::degenerate(sampled.len()));
    }

    let n = sampled.len() as f64;
    let centroid = sampled.iter().fold(Vector3::<f64>::zeros(), |acc, p| acc + p) / n;
    let scale = sampled
        .iter()
        .map(|p| (p - centroid).norm())
        .fold(0.0_f64, f64::max);

    if scale == 0.0 || !scale.is_finite() {
        return Err(NormalizeError::degenerate(sampled.len()));
    }

    let normalized: PointCloud = sampled
        .iter()
        .map(|p| {
            let q = (p - centroid) / scale;
            [q.x as f32, q.y as f32, q.z as f32]
        })
        .collect();

    Ok(NormalizedCloud {
        cloud: normalized,
        source_indices,
        centroid: [centroid.x, centroid.y, centroid.z],
        scale,
    })
}

/// Normalizes untyped coordinate rows, such as those read from a dataset
/// record. Every row must hold exactly three values.
pub fn normalize_rows<P, R>(
    rows: &[P],
    params: &NormalizeParams,
    rng: &mut R,
) -> NormalizeResult<NormalizedCloud>
where
    P: AsRef<[f32]>,
    R: Rng + ?Sized,
{
    let mut cloud = PointCloud::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        match row.as_ref() {
            &[x, y, z] => cloud.push([x, y, z]),
            other => {
                return Err(NormalizeError::invalid_input(format!(
                    "point {i} has {} coordinates, expected 3",
                    other.len()
                )))
            }
        }
    }
    normalize_with_rng(&cloud, params, rng)
}

#[inline]
fn to_vector(p: [f32; 3]) -> Vector3<f64> {
    Vector3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const TOL: f64 = 1e-5;

    fn norm(p: [f32; 3]) -> f64 {
        to_vector(p).norm()
    }

    fn mean(cloud: &PointCloud) -> [f64; 3] {
        let n = cloud.len() as f64;
        let sum = cloud
            .iter_points()
            .fold(Vector3::<f64>::zeros(), |acc, p| acc + to_vector(p));
        [sum.x / n, sum.y / n, sum.z / n]
    }

    fn params(n: usize) -> NormalizeParams {
        NormalizeParams::default().with_num_points(n)
    }

    #[test]
    fn cross_shape_scales_to_unit() {
        let cloud = PointCloud::from_points(&[
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, -2.0, 0.0],
        ]);
        let out = normalize_seeded(&cloud, &params(4), 0).unwrap();
        assert_eq!(out.source_indices, vec![0, 1, 2, 3]);
        assert_eq!(
            out.cloud.to_points(),
            vec![
                [0.5, 0.0, 0.0],
                [-0.5, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, -1.0, 0.0],
            ]
        );
        assert_abs_diff_eq!(out.scale, 2.0, epsilon = 1e-12);
        assert_eq!(out.centroid, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn coincident_origin_points_are_degenerate() {
        let cloud = PointCloud::from_points(&[[0.0, 0.0, 0.0]; 5]);
        let err = normalize_seeded(&cloud, &params(1024), 1).unwrap_err();
        assert_eq!(err, NormalizeError::degenerate(1024));
    }

    #[test]
    fn coincident_offset_points_are_degenerate() {
        let cloud = PointCloud::from_points(&[[0.1, -7.3, 1e4]; 37]);
        for n in [1, 16, 37, 5000] {
            let err = normalize_seeded(&cloud, &params(n), 3).unwrap_err();
            assert!(err.is_degenerate(), "n={n}: {err}");
        }
    }

    #[test]
    fn narrow_spread_far_from_origin_is_not_degenerate() {
        let cloud = PointCloud::from_points(&[[1.0e6, 0.0, 0.0], [1.0e6, 1.0e-10, 0.0]]);
        let out = normalize_seeded(&cloud, &params(2), 0).unwrap();
        assert_eq!(out.cloud.to_points(), vec![[0.0, -1.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn unseeded_normalize_keeps_invariants() {
        let cloud: PointCloud = (0..500)
            .map(|i| {
                let t = i as f32 * 0.37;
                [t.cos() * 4.0 + 9.0, t.sin() * 2.0, (i % 7) as f32]
            })
            .collect();
        for n in [64, 500, 2000] {
            let out = normalize(&cloud, &params(n)).unwrap();
            assert_eq!(out.len(), n);
            let max = out.cloud.iter_points().map(norm).fold(0.0_f64, f64::max);
            assert_abs_diff_eq!(max, 1.0, epsilon = TOL);
        }
    }

    #[test]
    fn single_target_point_is_degenerate() {
        let cloud = PointCloud::from_points(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let err = normalize_seeded(&cloud, &params(1), 3).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn empty_cloud_is_invalid() {
        let err = normalize_seeded(&PointCloud::new(), &params(4), 0).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidInput(_)));
    }

    #[test]
    fn zero_target_is_invalid() {
        let cloud = PointCloud::from_points(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let err = normalize_seeded(&cloud, &params(0), 0).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidInput(_)));
    }

    #[test]
    fn nan_coordinate_is_invalid() {
        let cloud = PointCloud::from_points(&[[1.0, 0.0, 0.0], [f32::NAN, 1.0, 0.0]]);
        let err = normalize_seeded(&cloud, &params(2), 0).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidInput(_)));
    }

    #[test]
    fn rows_with_wrong_arity_are_invalid() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
        let mut rng = StdRng::seed_from_u64(0);
        let err = normalize_rows(&rows, &params(4), &mut rng).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::invalid_input("point 1 has 2 coordinates, expected 3")
        );
    }

    #[test]
    fn rows_match_cloud_path() {
        let rows = vec![[1.0f32, 2.0, 3.0], [-1.0, 0.5, 2.0], [0.0, 0.0, 9.0]];
        let cloud = PointCloud::from_points(&rows);
        let mut rng = StdRng::seed_from_u64(11);
        let from_rows = normalize_rows(&rows, &params(8), &mut rng).unwrap();
        let from_cloud = normalize_seeded(&cloud, &params(8), 11).unwrap();
        assert_eq!(from_rows, from_cloud);
    }

    #[test]
    fn input_is_not_mutated() {
        let cloud = PointCloud::from_points(&[[3.0, 1.0, 0.0], [5.0, -2.0, 1.0], [0.0, 0.0, 4.0]]);
        let before = cloud.clone();
        let _ = normalize_seeded(&cloud, &params(10), 5).unwrap();
        assert_eq!(cloud, before);
    }

    #[test]
    fn denormalize_recovers_source_points() {
        let cloud = PointCloud::from_points(&[
            [10.0, 20.0, 30.0],
            [12.0, 18.0, 31.0],
            [9.0, 25.0, 29.5],
            [11.0, 21.0, 33.0],
        ]);
        let out = normalize_seeded(&cloud, &params(3), 9).unwrap();
        for (p, &src) in out.cloud.iter_points().zip(&out.source_indices) {
            let back = out.denormalize(p);
            let orig = cloud.point(src);
            for axis in 0..3 {
                assert_abs_diff_eq!(back[axis], orig[axis], epsilon = 1e-4);
            }
        }
    }

    proptest! {
        #[test]
        fn output_is_centered_unit_and_sized(
            pts in prop::collection::vec(
                (-100.0f32..100.0f32, -100.0f32..100.0f32, -100.0f32..100.0f32),
                2..600
            ),
            num_points in 2usize..1200,
            seed in any::<u64>(),
        ) {
            let cloud: PointCloud = pts.iter().map(|&(x, y, z)| [x, y, z]).collect();
            let out = match normalize_seeded(&cloud, &params(num_points), seed) {
                Ok(out) => out,
                Err(e) => {
                    // Only possible when the draw picked one location repeatedly.
                    prop_assert!(e.is_degenerate());
                    return Ok(());
                }
            };

            prop_assert_eq!(out.len(), num_points);
            prop_assert_eq!(out.source_indices.len(), num_points);

            let c = mean(&out.cloud);
            for v in c {
                prop_assert!(v.abs() < TOL, "centroid component {}", v);
            }

            let max = out.cloud.iter_points().map(norm).fold(0.0_f64, f64::max);
            prop_assert!((max - 1.0).abs() < TOL, "max norm {}", max);
            for p in out.cloud.iter_points() {
                prop_assert!(norm(p) <= 1.0 + TOL);
            }
        }

        #[test]
        fn subsampled_sources_are_distinct(
            pts in prop::collection::vec(
                (-10.0f32..10.0f32, -10.0f32..10.0f32, -10.0f32..10.0f32),
                20..400
            ),
            seed in any::<u64>(),
        ) {
            let cloud: PointCloud = pts.iter().map(|&(x, y, z)| [x, y, z]).collect();
            let num_points = cloud.len() / 2;
            let out = normalize_seeded(&cloud, &params(num_points), seed).unwrap();
            let mut idx = out.source_indices.clone();
            idx.sort_unstable();
            idx.dedup();
            prop_assert_eq!(idx.len(), num_points);
        }

        #[test]
        fn upsampled_points_come_from_input(
            pts in prop::collection::vec(
                (-10.0f32..10.0f32, -10.0f32..10.0f32, -10.0f32..10.0f32),
                2..30
            ),
            seed in any::<u64>(),
        ) {
            let cloud: PointCloud = pts.iter().map(|&(x, y, z)| [x, y, z]).collect();
            let num_points = cloud.len() * 4;
            let out = match normalize_seeded(&cloud, &params(num_points), seed) {
                Ok(out) => out,
                Err(e) => {
                    prop_assert!(e.is_degenerate());
                    return Ok(());
                }
            };
            for (p, &src) in out.cloud.iter_points().zip(&out.source_indices) {
                prop_assert!(src < cloud.len());
                let back = out.denormalize(p);
                let orig = cloud.point(src);
                for axis in 0..3 {
                    prop_assert!((back[axis] - orig[axis]).abs() < 1e-3);
                }
            }
        }

        #[test]
        fn seeded_runs_are_reproducible(
            pts in prop::collection::vec(
                (-50.0f32..50.0f32, -50.0f32..50.0f32, -50.0f32..50.0f32),
                3..300
            ),
            num_points in 1usize..500,
            seed in any::<u64>(),
        ) {
            let cloud: PointCloud = pts.iter().map(|&(x, y, z)| [x, y, z]).collect();
            let a = normalize_seeded(&cloud, &params(num_points), seed);
            let b = normalize_seeded(&cloud, &params(num_points), seed);
            prop_assert_eq!(a, b);
        }
    }
}
