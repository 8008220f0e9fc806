use crate::models::SchemeRecord;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog format: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scheme not found: {0}")]
    NotFound(String),
}

/// On-disk layout: `{"schemes": [...]}`
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    schemes: Vec<Value>,
}

/// Read-only, ordered collection of scheme records
///
/// Loaded once at startup and shared behind an `Arc`; iteration order is the
/// order of the source file and is what ties fall back to when ranking.
#[derive(Debug, Clone, Default)]
pub struct SchemeCatalog {
    schemes: Vec<SchemeRecord>,
}

impl SchemeCatalog {
    pub fn new(schemes: Vec<SchemeRecord>) -> Self {
        Self { schemes }
    }

    /// Load the catalog from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Parse catalog JSON, skipping records that fail to decode
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        let total = file.schemes.len();

        let schemes: Vec<SchemeRecord> = file
            .schemes
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(scheme) => Some(scheme),
                Err(e) => {
                    tracing::warn!("Skipping malformed scheme record #{}: {}", index, e);
                    None
                }
            })
            .collect();

        if schemes.len() < total {
            tracing::warn!("Loaded {} of {} scheme records", schemes.len(), total);
        }

        Ok(Self { schemes })
    }

    /// Load the catalog, degrading to an empty one on any failure
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(catalog) => {
                if catalog.is_empty() {
                    tracing::warn!("Scheme catalog at {} is empty", path.display());
                } else {
                    tracing::info!("Loaded {} schemes from {}", catalog.len(), path.display());
                }
                catalog
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load scheme catalog from {} ({}), continuing with an empty catalog",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Every record, including inactive ones, in catalog order
    pub fn all(&self) -> &[SchemeRecord] {
        &self.schemes
    }

    pub fn active(&self) -> impl Iterator<Item = &SchemeRecord> {
        self.schemes.iter().filter(|s| s.active)
    }

    /// Active schemes whose category equals `category`, ignoring case
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a SchemeRecord> + 'a {
        self.active().filter(move |s| s.in_category(category))
    }

    /// Look up a scheme by id, active or not
    pub fn get(&self, id: &str) -> Result<&SchemeRecord, CatalogError> {
        self.schemes
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// First `n` active schemes, used as assistant context
    pub fn sample(&self, n: usize) -> Vec<&SchemeRecord> {
        self.active().take(n).collect()
    }
}
