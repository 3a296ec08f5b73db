//! Reading and writing transforms and registries as XML documents.

pub mod document;
pub mod error;
pub mod store;

pub use document::{
    read_registry, read_transform, registry_from_str, registry_to_string, transform_from_str,
    transform_to_string, write_registry, write_transform, DOCUMENT_VERSION,
};
pub use error::{DocumentError, Result};
pub use store::XmlRegistryStore;
