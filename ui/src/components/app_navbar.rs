use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::context::{use_dashboard, use_translator};
use crate::core::locale::Locale;
use crate::core::preferences::Theme;
use crate::t;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platform-provided link constructors, so `ui` never needs the shell's
/// `Route` enum. Each function receives the localized label and returns a
/// `Link` containing it.
///
/// ```ignore
/// register_nav(NavBuilder {
///     overview: |label| rsx!( Link { class: "navbar__link", to: Route::Overview {}, "{label}" } ),
///     ...
/// });
/// ```
pub struct NavBuilder {
    pub overview: fn(label: &str) -> Element,
    pub top_titles: fn(label: &str) -> Element,
    pub genres: fn(label: &str) -> Element,
    pub series: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

/// First registration wins.
pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let ctx = use_dashboard();
    let tr = use_translator();
    let tr = tr();
    let locale = (ctx.locale)();
    let theme = (ctx.theme)();

    let on_locale = move |evt: FormEvent| match Locale::from_tag(&evt.value()) {
        Some(locale) => ctx.set_locale(locale),
        None => tracing::warn!(value = %evt.value(), "ignoring unknown locale selection"),
    };
    let on_theme = move |_: MouseEvent| ctx.toggle_theme();

    // Without a registered builder the caller's children are the links.
    let internal_nav = NAV_BUILDER.get().map(|b| {
        let overview = (b.overview)(&t!(tr, "nav-overview"));
        let top_titles = (b.top_titles)(&t!(tr, "nav-top-titles"));
        let genres = (b.genres)(&t!(tr, "nav-genres"));
        let series = (b.series)(&t!(tr, "nav-series"));
        rsx! {
            nav { class: "navbar__links",
                {overview}
                {top_titles}
                {genres}
                {series}
            }
        }
    });

    let theme_label = match theme {
        Theme::Light => t!(tr, "nav-theme-dark"),
        Theme::Dark => t!(tr, "nav-theme-light"),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", {t!(tr, "brand-name")} }
                    }
                    span { class: "navbar__brand-subtitle", {t!(tr, "brand-tagline")} }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                div { class: "navbar__controls",
                    button {
                        r#type: "button",
                        class: "navbar__theme",
                        title: t!(tr, "nav-theme-label"),
                        aria_label: t!(tr, "nav-theme-label"),
                        onclick: on_theme,
                        "{theme_label}"
                    }

                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!(tr, "nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{locale.tag()}",
                            oninput: on_locale,
                            for option_locale in Locale::ALL {
                                option {
                                    key: "{option_locale.tag()}",
                                    value: "{option_locale.tag()}",
                                    selected: option_locale == locale,
                                    "{option_locale.short_label()} · {option_locale.native_name()}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
