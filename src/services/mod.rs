// Service exports
pub mod assistant;
pub mod catalog;
pub mod prompt;

pub use assistant::{Assistant, AssistantClient, AssistantError};
pub use catalog::{SchemeCatalog, CatalogError};
