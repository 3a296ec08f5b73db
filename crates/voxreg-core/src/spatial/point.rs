//! Point type for representing spatial coordinates.
//!
//! Points represent positions in physical space.

use nalgebra::Point as NaPoint;
use super::Vector;
use serde::{Serialize, Deserialize};

/// A point in D-dimensional space.
///
/// Points represent positions in physical coordinate systems: centers of
/// rotation, sample positions, and the inputs and outputs of transforms.
///
/// This is a thin wrapper around nalgebra's Point to provide
/// domain-specific functionality while maintaining all nalgebra operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<const D: usize>(pub NaPoint<f64, D>);

impl<const D: usize> Point<D> {
    /// Create a new point from coordinates.
    pub fn new(coords: [f64; D]) -> Self {
        Self(NaPoint::from(coords))
    }

    /// Create a point at the origin (all coordinates zero).
    pub fn origin() -> Self {
        Self(NaPoint::origin())
    }

    /// Create a new point from a slice of coordinates.
    ///
    /// Returns `None` when the slice length does not match the dimension.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        if coords.len() != D {
            return None;
        }
        let mut point = Self::origin();
        for i in 0..D {
            point.0.coords[i] = coords[i];
        }
        Some(point)
    }

    /// Convert point to an array of coordinates.
    pub fn to_array(&self) -> [f64; D] {
        self.0.coords.into()
    }

    /// Position vector from the origin to this point.
    pub fn coords(&self) -> Vector<D> {
        Vector(self.0.coords)
    }

    /// Largest absolute coordinate difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (0..D)
            .map(|i| (self[i] - other[i]).abs())
            .fold(0.0, f64::max)
    }

    /// Get the inner nalgebra point.
    pub fn inner(&self) -> &NaPoint<f64, D> {
        &self.0
    }
}

impl<const D: usize> From<[f64; D]> for Point<D> {
    fn from(coords: [f64; D]) -> Self {
        Self::new(coords)
    }
}

impl<const D: usize> std::ops::Index<usize> for Point<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0.coords[index]
    }
}

impl<const D: usize> std::ops::IndexMut<usize> for Point<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0.coords[index]
    }
}

impl<const D: usize> std::ops::Sub for Point<D> {
    type Output = Vector<D>;

    fn sub(self, other: Self) -> Self::Output {
        Vector(self.0.coords - other.0.coords)
    }
}

impl<const D: usize> std::ops::Add<Vector<D>> for Point<D> {
    type Output = Self;

    fn add(self, vector: Vector<D>) -> Self::Output {
        Self(self.0 + vector.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Point3 = Point<3>;
    type Vector3 = Vector<3>;

    #[test]
    fn test_point_creation() {
        let p = Point3::new([1.0, 2.0, 3.0]);
        assert_eq!(p[0], 1.0);
        assert_eq!(p[1], 2.0);
        assert_eq!(p[2], 3.0);
    }

    #[test]
    fn test_point_origin() {
        let p = Point3::origin();
        assert_eq!(p.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_point_from_slice() {
        let p = Point3::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
        assert!(Point3::from_slice(&[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_point_subtraction() {
        let p1 = Point3::new([5.0, 5.0, 5.0]);
        let p2 = Point3::new([2.0, 3.0, 4.0]);
        assert_eq!(p1 - p2, Vector3::new([3.0, 2.0, 1.0]));
    }

    #[test]
    fn test_point_vector_addition() {
        let p = Point3::new([1.0, 2.0, 3.0]);
        let v = Vector3::new([4.0, 5.0, 6.0]);
        assert_eq!(p + v, Point3::new([5.0, 7.0, 9.0]));
    }

    #[test]
    fn test_max_abs_diff() {
        let a = Point3::new([1.0, 2.0, 3.0]);
        let b = Point3::new([1.5, 1.0, 3.0]);
        assert_eq!(a.max_abs_diff(&b), 1.0);
    }
}
