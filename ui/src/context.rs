//! Shared dashboard state handed down through Dioxus context.
//!
//! The platform shell calls [`use_dashboard_provider`] once at the root; every
//! page and the navbar read the current locale/theme and the dataset loader
//! from here. Locale and theme changes are persisted to the preference store.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::config::DashboardConfig;
use crate::core::dataset::DatasetLoader;
use crate::core::locale::{requested_languages_header, Locale};
use crate::core::preferences::{self, PreferenceStore, Theme};
use crate::i18n::Translator;

#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub locale: Signal<Locale>,
    pub theme: Signal<Theme>,
    store: Signal<Rc<dyn PreferenceStore>>,
    loader: Signal<DatasetLoader>,
}

impl DashboardContext {
    pub fn set_locale(mut self, locale: Locale) {
        if (self.locale)() == locale {
            return;
        }
        preferences::save_locale(&**self.store.read(), locale);
        tracing::info!(locale = %locale, "locale changed");
        self.locale.set(locale);
    }

    pub fn toggle_theme(mut self) {
        let next = (self.theme)().toggled();
        preferences::save_theme(&**self.store.read(), next);
        self.theme.set(next);
    }

    pub fn loader(&self) -> DatasetLoader {
        self.loader.read().clone()
    }
}

/// Resolves the initial locale/theme from `store` and provides the context.
pub fn use_dashboard_provider(
    config: DashboardConfig,
    store: impl FnOnce() -> Box<dyn PreferenceStore>,
) -> DashboardContext {
    let store: Rc<dyn PreferenceStore> = use_hook(|| Rc::from(store()));
    let initial_locale =
        use_hook(|| preferences::load_locale(&*store, &requested_languages_header()));
    let initial_theme = use_hook(|| preferences::load_theme(&*store));

    let locale = use_signal(|| initial_locale);
    let theme = use_signal(|| initial_theme);
    let store = use_signal(|| store);
    let loader = use_signal(|| config.loader());

    use_context_provider(|| DashboardContext {
        locale,
        theme,
        store,
        loader,
    })
}

pub fn use_dashboard() -> DashboardContext {
    use_context::<DashboardContext>()
}

/// Translator for the current locale, rebuilt only when the locale changes.
pub fn use_translator() -> Memo<Translator> {
    let ctx = use_dashboard();
    use_memo(move || Translator::new((ctx.locale)()))
}
