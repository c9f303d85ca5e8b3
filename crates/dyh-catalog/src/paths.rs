//! Catalog source resolution.

use std::path::{Path, PathBuf};

use crate::catalog::RuleCatalog;
use crate::error::CatalogError;

/// Environment variable naming a catalog file to use instead of the
/// built-in one.
pub const CATALOG_ENV_VAR: &str = "DYH_CATALOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl CatalogSource {
    /// Resolution order:
    /// 1. an explicit path (CLI flag)
    /// 2. the `DYH_CATALOG` environment variable
    /// 3. the built-in catalog
    pub fn resolve(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return CatalogSource::File(path.to_path_buf());
        }
        match std::env::var_os(CATALOG_ENV_VAR) {
            Some(value) if !value.is_empty() => CatalogSource::File(PathBuf::from(value)),
            _ => CatalogSource::Builtin,
        }
    }

    /// Load and validate the catalog, checking the sha256 pin when given.
    pub fn load(&self, pin: Option<&str>) -> Result<RuleCatalog, CatalogError> {
        match (self, pin) {
            (CatalogSource::File(path), Some(pin)) => RuleCatalog::verify_and_load(path, pin),
            (CatalogSource::File(path), None) => RuleCatalog::load(path),
            (CatalogSource::Builtin, pin) => {
                let catalog = RuleCatalog::builtin()?;
                if let Some(pin) = pin {
                    catalog.verify_pin(pin)?;
                }
                Ok(catalog)
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Builtin => crate::catalog::BUILTIN_ORIGIN.to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}
