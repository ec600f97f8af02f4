//! Basic geometric value types shared by the entity model and spatial index

mod bounds;
mod vector;

pub use bounds::BoundingBox3D;
pub use vector::{Vector2, Vector3};

/// A straight line segment, the unit of the flatten capability.
pub type Segment = [Vector3; 2];
