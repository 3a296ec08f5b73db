//! Spatial types for representing points, vectors and spacing.
//!
//! All types are based on nalgebra for efficient linear algebra operations.

pub mod point;
pub mod vector;
pub mod spacing;

pub use point::Point;
pub use vector::Vector;
pub use spacing::Spacing;

pub type Point3 = Point<3>;
pub type Vector3 = Vector<3>;
pub type Spacing3 = Spacing<3>;

/// Voxel counts along each axis of a space.
pub type Size3 = [usize; 3];
