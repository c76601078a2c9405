use thiserror::Error;

#[derive(Debug, Error)]
pub enum DietError {
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Soup not found: {0}")]
    SoupNotFound(String),

    #[error("Meal catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Failed to read stored '{key}': {reason}")]
    PersistenceRead { key: String, reason: String },

    #[error("Failed to save '{key}': {reason}")]
    PersistenceWrite { key: String, reason: String },

    #[error("No meals selected")]
    NoMealsSelected,

    #[error("Please fill in all fields.")]
    IncompleteGoals,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DietError {
    /// Wrap any failure raised while writing `key` as a `PersistenceWrite`.
    pub fn write_failure(key: &str, err: impl std::fmt::Display) -> Self {
        DietError::PersistenceWrite {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }

    /// Wrap any failure raised while reading `key` as a `PersistenceRead`.
    pub fn read_failure(key: &str, err: impl std::fmt::Display) -> Self {
        DietError::PersistenceRead {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DietError>;
