use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One facet of interest sent to the place-search backend, e.g. `tourism=museum`.
///
/// Only `value` is sent as the free-text query; `key` documents which OSM
/// facet the value belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchCategory {
    pub key: String,
    pub value: String,
}

impl SearchCategory {
    #[must_use]
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl FromStr for SearchCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s.split_once('=').ok_or_else(|| {
            ConfigError::Validation(format!("category '{s}' must have the form key=value"))
        })?;
        let category = Self::new(key.trim(), value.trim());
        if category.key.is_empty() || category.value.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{s}' has an empty key or value"
            )));
        }
        Ok(category)
    }
}

/// The built-in category list, in dedup tie-break order.
#[must_use]
pub fn default_categories() -> Vec<SearchCategory> {
    vec![
        SearchCategory::new("tourism", "attraction"),
        SearchCategory::new("tourism", "museum"),
        SearchCategory::new("tourism", "landmark"),
        SearchCategory::new("historic", "castle"),
        SearchCategory::new("historic", "monument"),
        SearchCategory::new("leisure", "park"),
    ]
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<SearchCategory>,
}

/// Load and validate the search categories from a YAML file.
///
/// File order is preserved; it determines which category wins when the same
/// place matches several of them.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<Vec<SearchCategory>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile = serde_yaml::from_str(&content)?;
    validate_categories(&file.categories)?;

    Ok(file.categories)
}

fn validate_categories(categories: &[SearchCategory]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one search category is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in categories {
        if category.key.trim().is_empty() || category.value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{category}' has an empty key or value"
            )));
        }
        if !seen.insert(category) {
            return Err(ConfigError::Validation(format!(
                "duplicate search category: '{category}'"
            )));
        }
    }

    Ok(())
}
