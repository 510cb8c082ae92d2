/// Axis-aligned bounding box over the finite points of a cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
    empty: bool,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [f32; 3]>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_with_point(p);
        }
        aabb
    }

    /// Grows the box to include `point`. Points with a NaN or infinite
    /// coordinate are ignored.
    pub fn expand_with_point(&mut self, point: [f32; 3]) {
        if !point.iter().all(|v| v.is_finite()) {
            return;
        }

        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return;
        }

        for (axis, &val) in point.iter().enumerate() {
            self.min[axis] = self.min[axis].min(val);
            self.max[axis] = self.max[axis].max(val);
        }
    }

    /// Smallest and largest coordinate over all three axes, or `None` for an
    /// empty box.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        if self.empty {
            return None;
        }
        let lo = self.min.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = self.max.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Some((lo, hi))
    }
}
