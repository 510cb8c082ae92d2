use crate::Aabb;

/// A point cloud stored as three parallel coordinate arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut cloud = Self::with_capacity(points.len());
        for &p in points {
            cloud.push(p);
        }
        cloud
    }

    pub fn push(&mut self, point: [f32; 3]) {
        self.x.push(point[0]);
        self.y.push(point[1]);
        self.z.push(point[2]);
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.iter_points())
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Returns `true` when every coordinate is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.x
            .iter()
            .chain(&self.y)
            .chain(&self.z)
            .all(|v| v.is_finite())
    }

    /// Gathers the points at `indices` into a new cloud, in index order.
    /// Repeated indices yield repeated points.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut out = Self::with_capacity(indices.len());
        for &idx in indices {
            assert!(idx < self.len(), "index out of bounds in select");
            out.push(self.point(idx));
        }
        out
    }

    pub fn to_points(&self) -> Vec<[f32; 3]> {
        self.iter_points().collect()
    }
}

impl FromIterator<[f32; 3]> for PointCloud {
    fn from_iter<I: IntoIterator<Item = [f32; 3]>>(iter: I) -> Self {
        let mut cloud = Self::new();
        for p in iter {
            cloud.push(p);
        }
        cloud
    }
}
