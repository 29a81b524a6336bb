use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../assets/practice_texts.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read text catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid text catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

/// Titled practice texts grouped by pool.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub chinese: Vec<CatalogEntry>,
    #[serde(default)]
    pub english: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        // The bundled file is checked by tests; an empty catalog still selects the placeholder.
        Self::from_json(BUILTIN_CATALOG).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
