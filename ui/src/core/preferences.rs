//! Persisted user preferences (theme and locale).
//!
//! Stores are string key/value maps. Native builds keep a JSON file in the
//! platform config dir; web builds use `localStorage`. Reads that fail are
//! logged and treated as "nothing stored" by the typed helpers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::locale::{resolve_locale, Locale, COOKIE_NAME};

pub const THEME_KEY: &str = "theme";
pub const LOCALE_KEY: &str = COOKIE_NAME;

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    #[error("preference file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self
            .values
            .lock()
            .map_err(|_| PreferenceError::Unavailable("memory store poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| PreferenceError::Unavailable("memory store poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten whole on every `set`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` inside the platform config directory.
    pub fn default_location() -> Result<Self, PreferenceError> {
        let dirs = directories::ProjectDirs::from("com", "Reelscope", "Reelscope").ok_or_else(
            || PreferenceError::Unavailable("unable to determine config directory".into()),
        )?;
        Ok(Self::new(dirs.config_dir().join("preferences.json")))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Result<Self, PreferenceError> {
        let storage = web_sys::window()
            .ok_or_else(|| PreferenceError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|err| PreferenceError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| PreferenceError::Unavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        self.storage
            .get_item(key)
            .map_err(|err| PreferenceError::Unavailable(format!("{err:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| PreferenceError::Unavailable(format!("{err:?}")))
    }
}

/// The platform store, or an in-memory one when it cannot be opened.
pub fn default_store() -> Box<dyn PreferenceStore> {
    #[cfg(target_arch = "wasm32")]
    let opened = LocalStorageStore::new().map(|store| Box::new(store) as Box<dyn PreferenceStore>);
    #[cfg(not(target_arch = "wasm32"))]
    let opened = FileStore::default_location().map(|store| Box::new(store) as Box<dyn PreferenceStore>);

    opened.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "falling back to in-memory preferences");
        Box::new(MemoryStore::new())
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PreferenceError::Unavailable(format!("unknown theme `{other}`"))),
        }
    }
}

fn read_logged(store: &dyn PreferenceStore, key: &str) -> Option<String> {
    store.get(key).unwrap_or_else(|err| {
        tracing::warn!(key, error = %err, "preference read failed");
        None
    })
}

fn write_logged(store: &dyn PreferenceStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        tracing::warn!(key, error = %err, "preference write failed");
    }
}

/// Stored theme, light when absent or unrecognised.
pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    read_logged(store, THEME_KEY)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default()
}

pub fn save_theme(store: &dyn PreferenceStore, theme: Theme) {
    write_logged(store, THEME_KEY, theme.as_str());
}

/// Stored locale choice if valid, else the requested languages, else the default.
pub fn load_locale(store: &dyn PreferenceStore, accept_language: &str) -> Locale {
    let stored = read_logged(store, LOCALE_KEY);
    resolve_locale(stored.as_deref(), accept_language)
}

pub fn save_locale(store: &dyn PreferenceStore, locale: Locale) {
    write_logged(store, LOCALE_KEY, locale.tag());
}
