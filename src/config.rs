use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{IngredientSearchError, Result};
use crate::search::{SearchTiming, StalePolicy};

pub const DEFAULT_INGREDIENT_SEARCH: &str = "Organic Banana";
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Hungry for ...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_query: String,
    pub placeholder: String,
    pub debounce_ms: u64,
    pub simulated_delay_ms: u64,
    pub stale_results: StalePolicy,
    /// JSON product list to search instead of the built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let timing = SearchTiming::default();
        Self {
            default_query: DEFAULT_INGREDIENT_SEARCH.to_string(),
            placeholder: DEFAULT_PLACEHOLDER_TEXT.to_string(),
            debounce_ms: timing.debounce.as_millis() as u64,
            simulated_delay_ms: timing.simulated_delay.as_millis() as u64,
            stale_results: timing.stale_results,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("ingredient-search").join("config.json"))
            .ok_or(IngredientSearchError::NoConfigDir)
    }

    /// A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_or_default() -> Self {
        match Self::default_path().and_then(|path| Self::load(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn timing(&self) -> SearchTiming {
        SearchTiming {
            debounce: Duration::from_millis(self.debounce_ms),
            simulated_delay: Duration::from_millis(self.simulated_delay_ms),
            stale_results: self.stale_results,
        }
    }
}
