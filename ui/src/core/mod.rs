//! Data and presentation logic shared by every page, free of UI types.

pub mod chart;
pub mod config;
pub mod dataset;
pub mod derive;
pub mod format;
pub mod locale;
pub mod preferences;
pub mod records;
pub mod table;

pub use dataset::{DatasetLoader, Envelope};
pub use locale::Locale;
