use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::MealCatalog;
use crate::error::{DietError, Result};
use crate::models::{Meal, Soup};

/// On-disk shape of a catalog export: one array or map per collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub soups: Vec<Soup>,
    #[serde(default)]
    pub soup_videos: HashMap<String, String>,
    #[serde(default)]
    pub swallow_videos: HashMap<String, String>,
}

/// Catalog backed by a JSON document on disk.
///
/// The file is read on every fetch, so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> DietError {
        DietError::CatalogUnavailable(format!("{}: {}", self.path.display(), err))
    }

    fn read(&self) -> Result<CatalogDocument> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;
        let doc: CatalogDocument =
            serde_json::from_str(&content).map_err(|e| self.unavailable(e))?;
        debug!(
            path = %self.path.display(),
            meals = doc.meals.len(),
            soups = doc.soups.len(),
            "catalog read"
        );
        Ok(doc)
    }
}

impl MealCatalog for JsonCatalog {
    fn fetch_all_meals(&self) -> Result<Vec<Meal>> {
        Ok(self.read()?.meals)
    }

    fn fetch_all_soups(&self) -> Result<Vec<Soup>> {
        Ok(self.read()?.soups)
    }

    fn soup_video(&self, name: &str) -> Result<Option<String>> {
        Ok(self.read()?.soup_videos.remove(&name.to_lowercase()))
    }

    fn swallow_video(&self, name: &str) -> Result<Option<String>> {
        Ok(self.read()?.swallow_videos.remove(&name.to_lowercase()))
    }
}
