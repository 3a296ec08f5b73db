//! Transform types and operations.
//!
//! This module provides the registered [`Transform`] value, the affine
//! representation underneath it, and the algebra on top: composition,
//! inversion, re-centering and decomposition.

pub mod trait_;
pub mod affine;
pub mod chained;
pub mod decomposition;
pub mod displacement_field;
pub mod rigid;
pub mod value;
pub mod versor;

pub use trait_::PointTransform;
pub use affine::AffineTransform;
pub use chained::{ChainedTransform, CompositionMode};
pub use decomposition::{decompose, DecomposedTransform};
pub use displacement_field::DisplacementField;
pub use rigid::AngleUnit;
pub use value::{Transform, TransformKind};
pub use versor::{AngleAxis, Versor};
