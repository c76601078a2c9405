use serde::{Deserialize, Serialize};

use crate::planner::constants::SWALLOW_MEALS;

/// Whether a meal name belongs to the fixed swallow set.
///
/// The match is exact: "amala" is not a swallow, "Amala" is.
pub fn is_swallow_name(name: &str) -> bool {
    SWALLOW_MEALS.contains(&name)
}

/// A meal record as fetched from the catalog.
///
/// `is_swallow` is always derived from `name` on deserialization. It is
/// written back out for compatibility with stored selections, but a stored
/// value is never trusted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MealDocument", rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion_size: Option<String>,
    #[serde(rename = "youtubeLink", skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    pub is_swallow: bool,
}

/// Wire shape of a meal, minus the derived swallow tag.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealDocument {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    calories: Option<u32>,
    #[serde(default)]
    portion_size: Option<String>,
    #[serde(default, rename = "youtubeLink")]
    video_link: Option<String>,
}

impl From<MealDocument> for Meal {
    fn from(doc: MealDocument) -> Self {
        let is_swallow = is_swallow_name(&doc.name);
        Self {
            id: doc.id,
            name: doc.name,
            description: doc.description,
            image_url: doc.image_url,
            ingredients: doc.ingredients,
            instructions: doc.instructions,
            calories: doc.calories,
            portion_size: doc.portion_size,
            video_link: doc.video_link,
            is_swallow,
        }
    }
}

impl Meal {
    /// Build a meal with only an id, name and description set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            is_swallow: is_swallow_name(&name),
            name,
            description: description.into(),
            image_url: None,
            ingredients: Vec::new(),
            instructions: None,
            calories: None,
            portion_size: None,
            video_link: None,
        }
    }

    /// Swallow meals are eaten with a soup chosen per slot.
    #[inline]
    pub fn requires_soup(&self) -> bool {
        self.is_swallow
    }
}

/// A soup record. Only `name` is guaranteed on stored soup choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Soup {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, rename = "youtubeLink", skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
}

impl Soup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            video_link: None,
        }
    }
}
