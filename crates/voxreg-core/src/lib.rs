//! Spatial transform values and transform algebra for volume registration.

pub mod config;
pub mod error;
pub mod spatial;
pub mod transform;

pub use config::Tolerances;
pub use error::{Result, TransformError};
pub use spatial::{Point, Point3, Size3, Spacing, Spacing3, Vector, Vector3};
pub use transform::{
    AffineTransform, AngleUnit, CompositionMode, DecomposedTransform, DisplacementField,
    PointTransform, Transform, TransformKind,
};
