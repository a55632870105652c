//! Runtime configuration for where datasets live.

use super::dataset::DatasetLoader;

pub const DATA_DIR_ENV: &str = "REELSCOPE_DATA_DIR";
pub const DATA_URL_ENV: &str = "REELSCOPE_DATA_URL";

pub const DEFAULT_DATA_DIR: &str = "public/data";
pub const DEFAULT_DATA_URL: &str = "/data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Directory read by native builds.
    pub data_dir: String,
    /// URL prefix fetched by web builds.
    pub data_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            data_url: DEFAULT_DATA_URL.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Reads overrides from the environment. Web builds have no process
    /// environment and always get the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            data_dir: non_empty(DATA_DIR_ENV).unwrap_or(defaults.data_dir),
            data_url: non_empty(DATA_URL_ENV).unwrap_or(defaults.data_url),
        }
    }

    /// Loader rooted at the location for the current target.
    pub fn loader(&self) -> DatasetLoader {
        if cfg!(target_arch = "wasm32") {
            DatasetLoader::new(self.data_url.clone())
        } else {
            DatasetLoader::new(self.data_dir.clone())
        }
    }
}
