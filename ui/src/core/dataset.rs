//! Dataset envelopes and the loader that reads them.
//!
//! A dataset is one JSON file produced upstream:
//! `{ generatedAt, snapshotDate, rows, data: [...], note? }`.
//! [`DatasetLoader::load`] never fails outward; a missing or malformed file
//! yields [`Envelope::unavailable`] so sibling loads and the render continue.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Diagnostic attached to envelopes that could not be loaded.
pub const UNAVAILABLE_NOTE: &str = "Dataset not available yet. Run the pipeline to generate it.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub snapshot_date: String,
    /// Advisory row count written upstream; may disagree with `data.len()`.
    #[serde(default)]
    pub rows: u64,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<T> Envelope<T> {
    pub fn unavailable() -> Self {
        Self {
            generated_at: String::new(),
            snapshot_date: String::new(),
            rows: 0,
            data: Vec::new(),
            note: Some(UNAVAILABLE_NOTE.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.note.is_none()
    }

    /// Count for display: the upstream `rows` when non-zero, else the records held.
    pub fn display_count(&self) -> u64 {
        if self.rows > 0 {
            self.rows
        } else {
            self.data.len() as u64
        }
    }

    pub fn snapshot(&self) -> Option<&str> {
        Some(self.snapshot_date.as_str()).filter(|s| !s.is_empty())
    }

    pub fn generated(&self) -> Option<&str> {
        Some(self.generated_at.as_str()).filter(|s| !s.is_empty())
    }
}

/// A record type bound to the dataset file that carries it.
pub trait DatasetRecord: DeserializeOwned {
    const FILE: &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("invalid dataset name `{0}`")]
    InvalidName(String),
    #[error("failed to read dataset `{name}`: {message}")]
    Read { name: String, message: String },
    #[error("failed to parse dataset `{name}`: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads named datasets below a fixed root.
///
/// On native targets the root is a directory; on `wasm32` it is a URL prefix
/// the files are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLoader {
    root: String,
}

impl DatasetLoader {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Load `name`, recovering every failure into [`Envelope::unavailable`].
    pub async fn load<T: DeserializeOwned>(&self, name: &str) -> Envelope<T> {
        match self.try_load(name).await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(dataset = name, error = %err, "dataset unavailable");
                Envelope::unavailable()
            }
        }
    }

    /// Load the dataset file bound to `R`.
    pub async fn load_dataset<R: DatasetRecord>(&self) -> Envelope<R> {
        self.load(R::FILE).await
    }

    pub async fn try_load<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Envelope<T>, DatasetError> {
        validate_name(name)?;
        let raw = self.read_raw(name).await?;
        serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
            name: name.to_string(),
            source,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn read_raw(&self, name: &str) -> Result<String, DatasetError> {
        let path = std::path::Path::new(&self.root).join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| DatasetError::Read {
                name: name.to_string(),
                message: err.to_string(),
            })
    }

    #[cfg(target_arch = "wasm32")]
    async fn read_raw(&self, name: &str) -> Result<String, DatasetError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let read_error = |message: String| DatasetError::Read {
            name: name.to_string(),
            message,
        };

        let window = web_sys::window().ok_or_else(|| read_error("no window".into()))?;
        let url = format!("{}/{}", self.root.trim_end_matches('/'), name);

        let response = JsFuture::from(window.fetch_with_str(&url))
            .await
            .map_err(|err| read_error(format!("{err:?}")))?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| read_error("unexpected fetch result".into()))?;
        if !response.ok() {
            return Err(read_error(format!("HTTP {}", response.status())));
        }

        let body = response
            .text()
            .map_err(|err| read_error(format!("{err:?}")))?;
        JsFuture::from(body)
            .await
            .map_err(|err| read_error(format!("{err:?}")))?
            .as_string()
            .ok_or_else(|| read_error("response body is not text".into()))
    }
}

/// Names are opaque file names; anything that could leave the root is refused.
fn validate_name(name: &str) -> Result<(), DatasetError> {
    let escapes = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..");
    if escapes {
        return Err(DatasetError::InvalidName(name.to_string()));
    }
    Ok(())
}
