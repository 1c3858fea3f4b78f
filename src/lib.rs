pub mod catalog;
pub mod config;
pub mod export;
pub mod model;

pub use catalog::{Catalog, CatalogError};
pub use config::{Config, ConfigError};
pub use export::{Export, ExportError, ExportFormat};
pub use model::*;
