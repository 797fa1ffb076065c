use serde::Deserialize;

use crate::restrict::{RestrictLimits, DEFAULT_MAX_ITEMS, DEFAULT_MAX_PROPERTIES};

fn default_max_properties() -> usize {
    DEFAULT_MAX_PROPERTIES
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_db() -> String {
    "recipes.db".to_string()
}

fn default_collection_filter() -> String {
    ".json".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_max_properties")]
    pub max_properties: usize,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_db")]
    pub db: String,
    #[serde(default = "default_collection_filter")]
    pub collection_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_properties: default_max_properties(),
            max_items: default_max_items(),
            db: default_db(),
            collection_filter: default_collection_filter(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn limits(&self) -> RestrictLimits {
        RestrictLimits {
            max_properties: self.max_properties,
            max_items: self.max_items,
        }
    }
}
