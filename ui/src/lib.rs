//! Shared UI crate for Reelscope: dataset loading, view derivation, formatting
//! and the Dioxus components every platform shell renders.

use dioxus::prelude::*;

pub mod context;
pub mod core;
pub mod i18n;
pub mod pages;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    pub mod cards;
    pub use cards::{Card, ChartCard, HeroBanner, KpiCard, KpiGrid, SectionHeader};

    pub mod charts;
    pub use charts::{BarChartView, LineChartView, ScatterView};

    pub mod data_table;
    pub use data_table::{DataTable, TableCardView};

    pub mod footer;
    pub use footer::Footer;
}

/// Unified theme stylesheet (ui/assets/theme/main.css).
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");

/// The same theme as text, for shells that inline it instead of serving assets.
pub const THEME_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
