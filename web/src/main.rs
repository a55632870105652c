use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::{AppNavbar, Footer};
use ui::context::use_dashboard_provider;
use ui::core::config::DashboardConfig;
use ui::core::preferences::default_store;
use ui::views::{Genres, Overview, Series, TopTitles};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Overview {},
    #[route("/top-titles")]
    TopTitles {},
    #[route("/genres")]
    Genres {},
    #[route("/series")]
    Series {},
}

fn nav_overview(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "navbar__link--active", to: Route::Overview {}, "{label}" })
}
fn nav_top_titles(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "navbar__link--active", to: Route::TopTitles {}, "{label}" })
}
fn nav_genres(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "navbar__link--active", to: Route::Genres {}, "{label}" })
}
fn nav_series(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", active_class: "navbar__link--active", to: Route::Series {}, "{label}" })
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialized: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        overview: nav_overview,
        top_titles: nav_top_titles,
        genres: nav_genres,
        series: nav_series,
    });

    let config = use_hook(DashboardConfig::from_env);
    let ctx = use_dashboard_provider(config, default_store);
    let theme = (ctx.theme)();
    let locale = (ctx.locale)();

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{ui::THEME_CSS_INLINE}" }
        }

        div {
            class: "app",
            "data-theme": theme.as_str(),
            lang: locale.tag(),
            Router::<Route> {}
        }
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        main { class: "app__main",
            Outlet::<Route> {}
        }
        Footer { }
    }
}
