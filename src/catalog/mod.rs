//! Entity Catalog
//!
//! Explicit list of the entities known to this application, built once at
//! startup. Replaces runtime discovery of models: an entity the router
//! should know about must be registered here.

mod registry;
mod standard;

pub use registry::{CatalogEntry, EntityCatalog};
