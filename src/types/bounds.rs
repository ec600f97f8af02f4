//! Axis-aligned bounding boxes for entities and spatial queries

use super::Vector3;
use std::fmt;

/// 3D axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3D {
    /// Minimum corner
    pub min: Vector3,
    /// Maximum corner
    pub max: Vector3,
}

impl BoundingBox3D {
    /// Create a new bounding box from min and max corners
    pub fn new(min: Vector3, max: Vector3) -> Self {
        BoundingBox3D { min, max }
    }

    /// A degenerate box covering a single point
    pub fn from_point(point: Vector3) -> Self {
        BoundingBox3D {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing all given points; `None` if the slice is empty
    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::from_point(*first);
        for p in rest {
            bounds.expand_to_include(*p);
        }
        Some(bounds)
    }

    /// Center point of the box
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along the given axis (0 = x, 1 = y, 2 = z)
    pub fn extent(&self, axis: usize) -> f64 {
        self.max.axis(axis) - self.min.axis(axis)
    }

    /// Axis of greatest extent
    pub fn longest_axis(&self) -> usize {
        let dx = self.extent(0);
        let dy = self.extent(1);
        let dz = self.extent(2);
        if dx >= dy && dx >= dz {
            0
        } else if dy >= dz {
            1
        } else {
            2
        }
    }

    /// Check if this box contains a point (boundary inclusive)
    pub fn contains(&self, point: Vector3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if two boxes overlap (boundary touching counts)
    pub fn intersects(&self, other: &BoundingBox3D) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Grow the box to include a point
    pub fn expand_to_include(&mut self, point: Vector3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox3D) -> BoundingBox3D {
        let mut merged = *self;
        merged.expand_to_include(other.min);
        merged.expand_to_include(other.max);
        merged
    }

    /// Squared distance from a point to the box (zero if inside)
    pub fn distance_squared_to(&self, point: Vector3) -> f64 {
        let mut d = 0.0;
        for axis in 0..3 {
            let v = point.axis(axis);
            let lo = self.min.axis(axis);
            let hi = self.max.axis(axis);
            if v < lo {
                d += (lo - v) * (lo - v);
            } else if v > hi {
                d += (v - hi) * (v - hi);
            }
        }
        d
    }
}

impl fmt::Display for BoundingBox3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox3D[{} -> {}]", self.min, self.max)
    }
}
