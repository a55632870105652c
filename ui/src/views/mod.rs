//! Routed pages. Each one loads its datasets once through the shared
//! [`DatasetLoader`](crate::core::DatasetLoader) and re-derives its view model
//! whenever the locale changes.

mod genres;
mod overview;
mod series;
mod top_titles;

pub use genres::Genres;
pub use overview::Overview;
pub use series::Series;
pub use top_titles::TopTitles;

use dioxus::prelude::*;

use crate::context::use_translator;
use crate::t;

#[component]
fn PageLoading() -> Element {
    let tr = use_translator();
    let tr = tr();

    rsx! {
        section { class: "page page--loading",
            p { class: "page__loading", role: "status", {t!(tr, "common-loading")} }
        }
    }
}
