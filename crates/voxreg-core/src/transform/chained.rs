//! Transform composition.
//!
//! `pre_multiply(other)` applies the receiver first and `other` second
//! (`self := other ∘ self`); `post_multiply(other)` applies `other` first
//! (`self := self ∘ other`). Every caller relies on this ordering.
//!
//! [`ChainedTransform`] keeps two transforms side by side instead of
//! collapsing them into one matrix:
//! T(x) = T2(T1(x))

use serde::{Serialize, Deserialize};
use crate::error::Result;
use crate::spatial::Point3;
use super::affine::AffineTransform;
use super::trait_::PointTransform;

/// Which part of the homogeneous matrix takes part in a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositionMode {
    /// Full 4×4 product of the effective matrices.
    #[default]
    Homogeneous,
    /// Product of the 3×3 linear parts; the receiver keeps its translation.
    LinearOnly,
}

impl AffineTransform {
    /// Compose so that `self` is applied first and `other` second.
    ///
    /// The result keeps the receiver's center of rotation; its translation
    /// is re-expressed so the composed mapping is exact whatever the two
    /// centers are.
    pub fn pre_multiply(&mut self, other: &AffineTransform, mode: CompositionMode) {
        match mode {
            CompositionMode::Homogeneous => {
                let product = other.homogeneous() * self.homogeneous();
                *self = AffineTransform::from_homogeneous(&product, self.center());
            }
            CompositionMode::LinearOnly => {
                let product = other.matrix() * self.matrix();
                self.set_matrix(product);
            }
        }
    }

    /// Compose so that `other` is applied first and `self` second.
    pub fn post_multiply(&mut self, other: &AffineTransform, mode: CompositionMode) {
        match mode {
            CompositionMode::Homogeneous => {
                let product = self.homogeneous() * other.homogeneous();
                *self = AffineTransform::from_homogeneous(&product, self.center());
            }
            CompositionMode::LinearOnly => {
                let product = self.matrix() * other.matrix();
                self.set_matrix(product);
            }
        }
    }

    /// Transform equal to applying `self`, then `next`.
    pub fn then(&self, next: &AffineTransform) -> AffineTransform {
        let mut composed = *self;
        composed.pre_multiply(next, CompositionMode::Homogeneous);
        composed
    }
}

/// Chained Transform (T2 after T1).
///
/// Applies two transforms in sequence:
/// y = T2(T1(x))
#[derive(Debug, Clone)]
pub struct ChainedTransform<T1, T2> {
    pub first: T1,
    pub second: T2,
}

impl<T1, T2> ChainedTransform<T1, T2> {
    /// Create a new chained transform.
    ///
    /// # Arguments
    /// * `first` - The first transform to apply
    /// * `second` - The second transform to apply
    pub fn new(first: T1, second: T2) -> Self {
        Self { first, second }
    }
}

impl<T1, T2> PointTransform for ChainedTransform<T1, T2>
where
    T1: PointTransform,
    T2: PointTransform,
{
    fn transform_point(&self, point: &Point3) -> Result<Point3> {
        let intermediate = self.first.transform_point(point)?;
        self.second.transform_point(&intermediate)
    }

    fn inverse_transform_point(&self, point: &Point3) -> Result<Point3> {
        let intermediate = self.second.inverse_transform_point(point)?;
        self.first.inverse_transform_point(&intermediate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::Vector3;
    use nalgebra::Matrix3;

    fn translation(x: f64, y: f64, z: f64) -> AffineTransform {
        AffineTransform::from_translation(Vector3::new([x, y, z]))
    }

    #[test]
    fn test_chained_transform() {
        // T1 -> [1, 0, 0], T2 -> [1, 1, 0]
        let chain = ChainedTransform::new(translation(1.0, 0.0, 0.0), translation(0.0, 1.0, 0.0));
        let mapped = chain.transform_point(&Point3::origin()).unwrap();
        assert_eq!(mapped, Point3::new([1.0, 1.0, 0.0]));
        let back = chain.inverse_transform_point(&mapped).unwrap();
        assert_eq!(back, Point3::origin());
    }

    #[test]
    fn test_pre_multiply_order() {
        // Zoom by 2 then shift by 1 along x: (1,0,0) -> (2,0,0) -> (3,0,0)
        let mut zoom =
            AffineTransform::new(Matrix3::identity() * 2.0, Vector3::zeros(), Point3::origin());
        zoom.pre_multiply(&translation(1.0, 0.0, 0.0), CompositionMode::Homogeneous);
        let mapped = zoom.transform_point(&Point3::new([1.0, 0.0, 0.0])).unwrap();
        assert!(mapped.max_abs_diff(&Point3::new([3.0, 0.0, 0.0])) < 1e-12);
    }

    #[test]
    fn test_post_multiply_order() {
        // Shift by 1 then zoom by 2: (1,0,0) -> (2,0,0) -> (4,0,0)
        let mut zoom =
            AffineTransform::new(Matrix3::identity() * 2.0, Vector3::zeros(), Point3::origin());
        zoom.post_multiply(&translation(1.0, 0.0, 0.0), CompositionMode::Homogeneous);
        let mapped = zoom.transform_point(&Point3::new([1.0, 0.0, 0.0])).unwrap();
        assert!(mapped.max_abs_diff(&Point3::new([4.0, 0.0, 0.0])) < 1e-12);
    }

    #[test]
    fn test_composition_matches_chain_with_centers() {
        let rotation = crate::transform::rigid::rotation_matrix_from_euler([0.2, -0.1, 0.7]);
        let first = AffineTransform::new(
            rotation,
            Vector3::new([1.0, 2.0, 3.0]),
            Point3::new([10.0, 0.0, 5.0]),
        );
        let second = AffineTransform::new(
            Matrix3::new(1.2, 0.1, 0.0, 0.0, 0.9, 0.2, 0.0, 0.0, 1.1),
            Vector3::new([-4.0, 0.5, 0.0]),
            Point3::new([-2.0, 7.0, 1.0]),
        );
        let composed = first.then(&second);
        assert_eq!(composed.center(), first.center());

        let chain = ChainedTransform::new(first, second);
        for p in [Point3::origin(), Point3::new([3.0, -8.0, 12.0])] {
            let a = composed.transform_point(&p).unwrap();
            let b = chain.transform_point(&p).unwrap();
            assert!(a.max_abs_diff(&b) < 1e-10);
        }
    }

    #[test]
    fn test_linear_only_keeps_translation() {
        let shift = Vector3::new([1.0, 2.0, 3.0]);
        let mut t = AffineTransform::new(Matrix3::identity() * 2.0, shift, Point3::origin());
        let other = AffineTransform::new(
            Matrix3::identity() * 3.0,
            Vector3::new([9.0, 9.0, 9.0]),
            Point3::origin(),
        );
        t.pre_multiply(&other, CompositionMode::LinearOnly);
        assert_eq!(*t.matrix(), Matrix3::identity() * 6.0);
        assert_eq!(t.translation(), Vector3::new([1.0, 2.0, 3.0]));
    }
}
