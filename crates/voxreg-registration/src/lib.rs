//! Per-space transform registries and the registration propagation engine.

pub mod error;
pub mod propagation;
pub mod registry;
pub mod space;
pub mod store;

pub use error::{RegistrationError, Result};
pub use propagation::{
    PropagatedRegistries, PropagationConfig, Registration, RegistrationPropagator,
};
pub use registry::TransformRegistry;
pub use space::{Space, SpaceDescriptor};
pub use store::{MemoryRegistryStore, RegistryStore};
