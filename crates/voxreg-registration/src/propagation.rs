//! Registration propagation.
//!
//! When a moving space is registered onto a fixed space and resampled onto
//! the fixed grid, the registries of the moving, fixed and resampled spaces
//! must be updated so that every space already registered with one side is
//! reachable from the other. [`RegistrationPropagator::propagate`] computes
//! the updated registries without touching its inputs; persisting them is
//! left to a [`RegistryStore`].
//!
//! Closure is one hop deep: a space registered with the fixed space becomes
//! reachable from the moving space, but spaces registered only with those
//! neighbours are not.

use serde::{Deserialize, Serialize};
use voxreg_core::{CompositionMode, Tolerances, Transform, TransformError};
use crate::error::{RegistrationError, Result};
use crate::registry::TransformRegistry;
use crate::space::{Space, SpaceDescriptor};
use crate::store::RegistryStore;

/// Propagation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropagationConfig {
    /// Tolerances used when inverting the forward transform.
    pub tolerances: Tolerances,
}

impl PropagationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }
}

/// Result of a pairwise registration, mapping moving coordinates to fixed
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    /// Affine result; the backward transform is its inverse.
    Affine(Transform),
    /// Dense result; fields have no analytic inverse so both directions are
    /// supplied.
    DisplacementField { forward: Transform, backward: Transform },
}

impl Registration {
    /// Affine registration. Fails with `TypeMismatch` for a displacement field.
    pub fn affine(forward: Transform) -> Result<Self> {
        if !forward.is_affine() {
            return Err(TransformError::type_mismatch(
                "an affine registration needs an affine forward transform",
            )
            .into());
        }
        Ok(Self::Affine(forward))
    }

    /// Deformable registration. Both transforms must be displacement fields.
    pub fn displacement_field(forward: Transform, backward: Transform) -> Result<Self> {
        if !forward.is_displacement_field() || !backward.is_displacement_field() {
            return Err(TransformError::type_mismatch(
                "a deformable registration needs forward and backward displacement fields",
            )
            .into());
        }
        Ok(Self::DisplacementField { forward, backward })
    }

    pub fn forward(&self) -> &Transform {
        match self {
            Self::Affine(forward) => forward,
            Self::DisplacementField { forward, .. } => forward,
        }
    }

    /// The supplied backward transform; `None` for affine registrations.
    pub fn backward(&self) -> Option<&Transform> {
        match self {
            Self::Affine(_) => None,
            Self::DisplacementField { backward, .. } => Some(backward),
        }
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, Self::Affine(_))
    }
}

/// Registries produced by a propagation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagatedRegistries {
    pub moving: TransformRegistry,
    pub fixed: TransformRegistry,
    pub resampled: TransformRegistry,
}

impl PropagatedRegistries {
    /// Save every registry whose space has a storage location. Returns the
    /// number of registries saved.
    pub fn persist<S: RegistryStore + ?Sized>(
        &self,
        store: &mut S,
        moving: &SpaceDescriptor,
        fixed: &SpaceDescriptor,
        resampled: &SpaceDescriptor,
    ) -> Result<usize> {
        let mut saved = 0;
        for (space, registry) in [
            (moving, &self.moving),
            (fixed, &self.fixed),
            (resampled, &self.resampled),
        ] {
            if space.storage().is_none() {
                tracing::debug!(space = %space.id(), "no storage location, registry not persisted");
                continue;
            }
            store.save(space, registry)?;
            saved += 1;
        }
        Ok(saved)
    }
}

/// Updates registries after a pairwise registration.
#[derive(Debug, Clone, Default)]
pub struct RegistrationPropagator {
    config: PropagationConfig,
}

impl RegistrationPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PropagationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Compute the registries of `moving`, `fixed` and the newly resampled
    /// space after `registration`.
    ///
    /// A singular affine forward transform fails before any registry is
    /// built. Template spaces keep their registries; the remaining updates
    /// still happen.
    pub fn propagate(
        &self,
        registration: &Registration,
        moving: &Space,
        fixed: &Space,
        resampled: &SpaceDescriptor,
    ) -> Result<PropagatedRegistries> {
        validate_spaces(moving, fixed, resampled)?;
        let (forward, backward) =
            self.resolve(registration, &moving.descriptor, &fixed.descriptor)?;

        tracing::info!(
            moving = %moving.id(),
            fixed = %fixed.id(),
            resampled = %resampled.id(),
            affine = registration.is_affine(),
            "propagating registration"
        );

        let mut moving_registry = moving.registry.clone();
        let mut fixed_registry = fixed.registry.clone();
        let mut resampled_registry = TransformRegistry::new(resampled.id());

        if moving.descriptor.is_template() {
            tracing::warn!(
                space = %moving.id(),
                "moving space is a template, forward transform not stored"
            );
        } else {
            moving_registry.append(forward.clone(), true);
        }

        resampled_registry.append(backward.clone(), true);

        if fixed.descriptor.is_template() {
            tracing::warn!(
                space = %fixed.id(),
                "fixed space is a template, backward transform not stored"
            );
        } else {
            fixed_registry.append(backward.clone(), true);
        }

        if !moving.descriptor.is_template() && forward.is_affine() {
            let closed = close_through(&fixed_registry, &moving_registry, &forward, moving.id())?;
            for transform in closed {
                tracing::debug!(
                    from = %moving.id(),
                    to = %transform.target_space_id(),
                    "closed through fixed space"
                );
                moving_registry.append(transform, true);
            }
        }

        if !fixed.descriptor.is_template() && backward.is_affine() {
            let closed = close_through(&moving_registry, &fixed_registry, &backward, fixed.id())?;
            for transform in closed {
                tracing::debug!(
                    from = %fixed.id(),
                    to = %transform.target_space_id(),
                    "closed through moving space"
                );
                fixed_registry.append(transform, true);
            }
        }

        // The resampled space lives on the fixed grid.
        for transform in fixed_registry.transforms().filter(|t| t.is_affine()) {
            resampled_registry.append(transform.clone(), false);
        }

        tracing::info!(
            moving_entries = moving_registry.len(),
            fixed_entries = fixed_registry.len(),
            resampled_entries = resampled_registry.len(),
            "propagation complete"
        );

        Ok(PropagatedRegistries {
            moving: moving_registry,
            fixed: fixed_registry,
            resampled: resampled_registry,
        })
    }

    /// Propagate and write the result back into `moving` and `fixed`.
    /// Returns the resampled space with its new registry. On error neither
    /// space is modified.
    pub fn apply(
        &self,
        registration: &Registration,
        moving: &mut Space,
        fixed: &mut Space,
        resampled: SpaceDescriptor,
    ) -> Result<Space> {
        let propagated = self.propagate(registration, moving, fixed, &resampled)?;
        moving.registry = propagated.moving;
        fixed.registry = propagated.fixed;
        Ok(Space::with_registry(resampled, propagated.resampled))
    }

    /// Forward and backward transforms labelled for their target spaces.
    /// Both carry the fixed geometry, which is what resampling is driven
    /// with.
    fn resolve(
        &self,
        registration: &Registration,
        moving: &SpaceDescriptor,
        fixed: &SpaceDescriptor,
    ) -> Result<(Transform, Transform)> {
        let (forward, backward) = match registration {
            Registration::Affine(forward) => {
                // The inverse is named after the moving space, not the forward name.
                let backward = forward
                    .inverse_with(&self.config.tolerances)?
                    .with_name(String::new());
                (forward.clone(), backward)
            }
            Registration::DisplacementField { forward, backward } => {
                (forward.clone(), backward.clone())
            }
        };

        let forward = label(forward, fixed.id()).with_geometry(fixed.size(), fixed.spacing());
        let backward =
            label(backward, moving.id()).with_geometry(fixed.size(), fixed.spacing());
        Ok((forward, backward))
    }
}

fn label(transform: Transform, target: &str) -> Transform {
    let unnamed = transform.name().is_empty();
    let transform = transform.with_target_space(target);
    if unnamed {
        transform.with_name(target)
    } else {
        transform
    }
}

fn validate_spaces(moving: &Space, fixed: &Space, resampled: &SpaceDescriptor) -> Result<()> {
    if moving.id() == fixed.id() {
        return Err(RegistrationError::invalid_configuration(format!(
            "space '{}' cannot be registered onto itself",
            moving.id()
        )));
    }
    if resampled.id() == moving.id() || resampled.id() == fixed.id() {
        return Err(RegistrationError::invalid_configuration(format!(
            "resampled space reuses the id '{}'",
            resampled.id()
        )));
    }
    for space in [moving, fixed] {
        if space.registry.reference_space_id() != space.id() {
            return Err(RegistrationError::invalid_configuration(format!(
                "registry of '{}' is attached to space '{}'",
                space.registry.reference_space_id(),
                space.id()
            )));
        }
    }
    Ok(())
}

/// For every affine `other -> G` in `source` that `target` lacks, the
/// composition `G ∘ link`. Entries keyed `excluded` are skipped.
fn close_through(
    source: &TransformRegistry,
    target: &TransformRegistry,
    link: &Transform,
    excluded: &str,
) -> Result<Vec<Transform>> {
    let mut closed = Vec::new();
    for (other, transform) in source {
        if other == excluded || target.contains(other) || !transform.is_affine() {
            continue;
        }
        let mut composed = transform.clone();
        composed.post_multiply(link, CompositionMode::Homogeneous)?;
        closed.push(composed);
    }
    Ok(closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxreg_core::{PointTransform, Point3, Spacing3, Vector3};

    fn space(id: &str) -> Space {
        Space::new(SpaceDescriptor::new(id, [10, 10, 10], Spacing3::uniform(1.0)))
    }

    fn translation(x: f64, y: f64, z: f64) -> Transform {
        Transform::translation("", Vector3::new([x, y, z]))
    }

    #[test]
    fn test_direct_registration() {
        let moving = space("mr");
        let fixed = Space::new(SpaceDescriptor::new(
            "ct",
            [64, 64, 20],
            Spacing3::new([0.5, 0.5, 2.0]),
        ));
        let resampled = fixed.descriptor.resampled("mr-on-ct");
        let registration = Registration::affine(translation(10.0, 0.0, 0.0)).unwrap();

        let result = RegistrationPropagator::new()
            .propagate(&registration, &moving, &fixed, &resampled)
            .unwrap();

        let forward = result.moving.get("ct").unwrap();
        assert_eq!(forward.translations().to_array(), [10.0, 0.0, 0.0]);
        assert_eq!(forward.size(), [64, 64, 20]);

        let backward = result.fixed.get("mr").unwrap();
        assert_eq!(backward.translations().to_array(), [-10.0, 0.0, 0.0]);
        assert_eq!(backward.spacing(), Spacing3::new([0.5, 0.5, 2.0]));

        assert_eq!(result.resampled.reference_space_id(), "mr-on-ct");
        assert_eq!(result.resampled.len(), 1);
        assert_eq!(result.resampled.get("mr"), Some(backward));
    }

    #[test]
    fn test_unnamed_transforms_take_target_name() {
        let registration = Registration::affine(translation(1.0, 0.0, 0.0)).unwrap();
        let fixed = space("ct");
        let result = RegistrationPropagator::new()
            .propagate(&registration, &space("mr"), &fixed, &fixed.descriptor.resampled("r"))
            .unwrap();
        assert_eq!(result.moving.get("ct").unwrap().name(), "ct");
        assert_eq!(result.fixed.get("mr").unwrap().name(), "mr");
    }

    #[test]
    fn test_inverse_does_not_inherit_forward_name() {
        let forward = translation(1.0, 0.0, 0.0).with_name("MR to CT");
        let registration = Registration::affine(forward).unwrap();
        let fixed = space("ct");
        let result = RegistrationPropagator::new()
            .propagate(&registration, &space("mr"), &fixed, &fixed.descriptor.resampled("r"))
            .unwrap();
        assert_eq!(result.moving.get("ct").unwrap().name(), "MR to CT");
        assert_eq!(result.fixed.get("mr").unwrap().name(), "mr");
        assert_eq!(result.resampled.get("mr").unwrap().name(), "mr");
    }

    #[test]
    fn test_singular_forward_aborts() {
        let mut forward = translation(0.0, 0.0, 0.0);
        forward.set_matrix_flat(&[0.0; 9]).unwrap();
        let registration = Registration::affine(forward).unwrap();

        let mut moving = space("mr");
        let mut fixed = space("ct");
        let resampled = fixed.descriptor.resampled("r");
        let err = RegistrationPropagator::new()
            .apply(&registration, &mut moving, &mut fixed, resampled)
            .unwrap_err();

        assert!(matches!(
            err,
            RegistrationError::Transform(TransformError::SingularTransform { .. })
        ));
        assert!(moving.registry.is_empty());
        assert!(fixed.registry.is_empty());
    }

    #[test]
    fn test_registration_kind_checks() {
        let field =
            Transform::from_displacement_field("", voxreg_core::DisplacementField::new("f.nii"));
        assert!(matches!(
            Registration::affine(field.clone()),
            Err(RegistrationError::Transform(TransformError::TypeMismatch(_)))
        ));
        let mixed = Registration::displacement_field(translation(1.0, 0.0, 0.0), field.clone());
        assert!(mixed.is_err());
        let registration = Registration::displacement_field(field.clone(), field).unwrap();
        assert!(!registration.is_affine());
        assert!(registration.backward().is_some());
    }

    #[test]
    fn test_rejects_self_registration() {
        let registration = Registration::affine(translation(1.0, 0.0, 0.0)).unwrap();
        let a = space("ct");
        let err = RegistrationPropagator::new()
            .propagate(&registration, &a, &a, &a.descriptor.resampled("r"))
            .unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_closure_composes_through_fixed() {
        let moving = space("mr");
        let mut fixed = space("ct");
        fixed
            .registry
            .append(translation(0.0, 5.0, 0.0).with_target_space("pet"), true);

        let registration = Registration::affine(translation(10.0, 0.0, 0.0)).unwrap();
        let result = RegistrationPropagator::new()
            .propagate(&registration, &moving, &fixed, &fixed.descriptor.resampled("r"))
            .unwrap();

        let to_pet = result.moving.get("pet").unwrap();
        let mapped = to_pet.transform_point(&Point3::new([1.0, 1.0, 1.0])).unwrap();
        assert!(mapped.max_abs_diff(&Point3::new([11.0, 6.0, 1.0])) < 1e-12);
        assert_eq!(to_pet.target_space_id(), "pet");
    }
}
