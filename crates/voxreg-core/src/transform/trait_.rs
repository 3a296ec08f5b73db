//! Point-mapping trait shared by every transform representation.

use crate::error::Result;
use crate::spatial::Point3;

/// Maps points from one physical space to another.
///
/// The forward direction maps moving-space coordinates into fixed-space
/// coordinates; `inverse_transform_point` pulls fixed-space points back.
pub trait PointTransform {
    /// Apply the forward mapping to a point.
    fn transform_point(&self, point: &Point3) -> Result<Point3>;

    /// Apply the backward mapping to a point.
    ///
    /// Fails with `SingularTransform` when the forward mapping has no inverse.
    fn inverse_transform_point(&self, point: &Point3) -> Result<Point3>;

    /// Apply the forward mapping to a batch of points.
    fn transform_points(&self, points: &[Point3]) -> Result<Vec<Point3>> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }
}
