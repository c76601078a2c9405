//! Read-only access to meal and soup records.
//!
//! The catalog is a remote document store in production; here it is a trait
//! with a JSON-document backend and an in-memory backend. Neither retries.

mod json;
mod matching;

use std::collections::HashMap;

use tracing::warn;

use crate::error::Result;
use crate::models::{Meal, Soup};
use crate::planner::YOUTUBE_WATCH_PREFIX;

pub use json::{CatalogDocument, JsonCatalog};
pub use matching::{match_meal_name, NameMatch};

/// Source of meal and soup records.
///
/// Every method fails with `CatalogUnavailable` when the backing store cannot
/// be reached. An empty result is not a failure.
pub trait MealCatalog {
    fn fetch_all_meals(&self) -> Result<Vec<Meal>>;
    fn fetch_all_soups(&self) -> Result<Vec<Soup>>;

    fn fetch_meal(&self, id: &str) -> Result<Option<Meal>> {
        Ok(self.fetch_all_meals()?.into_iter().find(|m| m.id == id))
    }

    /// Tutorial link for a soup, keyed by lowercase soup name.
    fn soup_video(&self, name: &str) -> Result<Option<String>>;

    /// Tutorial link for preparing a swallow, keyed by lowercase meal name.
    fn swallow_video(&self, name: &str) -> Result<Option<String>>;
}

/// Fetch meals, degrading to an empty list.
///
/// On failure the notice text for the user is returned alongside.
pub fn fetch_meals_or_empty<C: MealCatalog + ?Sized>(catalog: &C) -> (Vec<Meal>, Option<String>) {
    match catalog.fetch_all_meals() {
        Ok(meals) => (meals, None),
        Err(err) => {
            warn!(error = %err, "meal catalog unavailable, continuing with no meals");
            (Vec::new(), Some(err.to_string()))
        }
    }
}

/// Fetch soups, degrading to an empty list.
pub fn fetch_soups_or_empty<C: MealCatalog + ?Sized>(catalog: &C) -> (Vec<Soup>, Option<String>) {
    match catalog.fetch_all_soups() {
        Ok(soups) => (soups, None),
        Err(err) => {
            warn!(error = %err, "soup catalog unavailable, continuing with no soups");
            (Vec::new(), Some(err.to_string()))
        }
    }
}

/// Look up a tutorial link, degrading to no link.
///
/// A missing video is not reported. An unreachable catalog gives the notice
/// text for the user alongside.
pub fn video_or_notice(lookup: Result<Option<String>>) -> (Option<String>, Option<String>) {
    match lookup {
        Ok(link) => (link, None),
        Err(err) => {
            warn!(error = %err, "video lookup failed, showing no link");
            (None, Some(err.to_string()))
        }
    }
}

/// Expand a stored video reference into a link.
///
/// Anything not starting with `http` is taken as a bare YouTube id.
pub fn video_url(link: &str) -> String {
    let link = link.trim();
    if link.starts_with("http") {
        link.to_string()
    } else {
        format!("{}{}", YOUTUBE_WATCH_PREFIX, link)
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    pub meals: Vec<Meal>,
    pub soups: Vec<Soup>,
    pub soup_videos: HashMap<String, String>,
    pub swallow_videos: HashMap<String, String>,
}

impl StaticCatalog {
    pub fn new(meals: Vec<Meal>, soups: Vec<Soup>) -> Self {
        Self {
            meals,
            soups,
            ..Self::default()
        }
    }
}

impl MealCatalog for StaticCatalog {
    fn fetch_all_meals(&self) -> Result<Vec<Meal>> {
        Ok(self.meals.clone())
    }

    fn fetch_all_soups(&self) -> Result<Vec<Soup>> {
        Ok(self.soups.clone())
    }

    fn soup_video(&self, name: &str) -> Result<Option<String>> {
        Ok(self.soup_videos.get(&name.to_lowercase()).cloned())
    }

    fn swallow_video(&self, name: &str) -> Result<Option<String>> {
        Ok(self.swallow_videos.get(&name.to_lowercase()).cloned())
    }
}
