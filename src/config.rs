use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::export::ExportFormat;

pub const CATALOG_PATH_VAR: &str = "LIBRARY_CATALOG_PATH";
pub const EXPORT_FORMAT_VAR: &str = "LIBRARY_EXPORT_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Usage: book-catalog /path/to/catalog.json [format] (or set LIBRARY_CATALOG_PATH)")]
    MissingCatalogPath,
    #[error("unknown export format: {0} (expected csv, md or json)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub format: ExportFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }

    /// Positional arguments win over environment variables.
    pub fn from_sources<I, F>(args: I, var: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let catalog_path = args
            .next()
            .filter(|path| !path.is_empty())
            .or_else(|| var(CATALOG_PATH_VAR))
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingCatalogPath)?;

        let format = match args.next().or_else(|| var(EXPORT_FORMAT_VAR)) {
            Some(name) => name.parse::<ExportFormat>().map_err(ConfigError::UnknownFormat)?,
            None => ExportFormat::default(),
        };

        Ok(Self {
            catalog_path,
            format,
        })
    }
}
