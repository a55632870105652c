//! Internationalization support for `reelscope-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (bundle selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile-time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en/reelscope_ui.ftl      (fallback/reference)
//!   pt-BR/reelscope_ui.ftl
//! ```
//!
//! There is no process-wide language. Each render resolves a [`Locale`] and
//! builds (or reuses) a [`Translator`] for it, which is then passed to every
//! lookup:
//! ```ignore
//! use ui::i18n::Translator;
//! use ui::core::Locale;
//! let tr = Translator::new(Locale::PtBr);
//! let label = ui::t!(tr, "nav-overview");
//! ```
//!
//! To add a locale: copy `en/reelscope_ui.ftl` to `i18n/<tag>/reelscope_ui.ftl`,
//! translate the values (ids and placeholders unchanged), add the variant to
//! [`Locale`], and run the completeness tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use fluent::FluentValue;
use i18n_embed::fluent::FluentLanguageLoader;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::core::locale::{Locale, DEFAULT_LOCALE};

pub use i18n_embed_fl::fl;

/// Translation lookup through an explicit [`Translator`].
///
/// ```ignore
/// t!(tr, "nav-overview")
/// t!(tr, "common-snapshot", value = "Jan 15, 2024")
/// ```
#[macro_export]
macro_rules! t {
    ($tr:expr, $key:literal) => {
        $crate::i18n::fl!($tr.loader(), $key)
    };
    ($tr:expr, $key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!($tr.loader(), $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; the FTL file in every locale folder is `{DOMAIN}.ftl`.
const DOMAIN: &str = "reelscope_ui";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Message lookup bound to one locale.
#[derive(Clone)]
pub struct Translator {
    locale: Locale,
    loader: Arc<FluentLanguageLoader>,
}

impl Translator {
    /// Loads the bundle for `locale` on top of the fallback. A failed
    /// selection is logged and leaves the fallback strings in place.
    pub fn new(locale: Locale) -> Self {
        let loader = FluentLanguageLoader::new(DOMAIN, DEFAULT_LOCALE.langid());
        if let Err(err) = i18n_embed::select(&loader, &Localizations, &[locale.langid()]) {
            tracing::warn!(locale = %locale, error = %err, "failed selecting language bundle");
        }
        // Applies to the bundles loaded so far, so it must follow `select`.
        loader.set_use_isolating(false);
        Self {
            locale,
            loader: Arc::new(loader),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn loader(&self) -> &FluentLanguageLoader {
        &self.loader
    }

    /// Runtime lookup for ids that are not literals (e.g. derived from data).
    pub fn get(&self, id: &str) -> String {
        self.loader.get(id)
    }

    pub fn get_args(&self, id: &str, args: HashMap<&str, String>) -> String {
        let args: HashMap<&str, FluentValue<'_>> = args
            .into_iter()
            .map(|(name, value)| (name, FluentValue::from(value)))
            .collect();
        self.loader.get_args(id, args)
    }

    pub fn has(&self, id: &str) -> bool {
        self.loader.has(id)
    }
}

impl PartialEq for Translator {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Embedded language folders, sorted.
pub fn available_locales() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

/// Parsed identifiers of [`available_locales`], skipping unparsable folders.
pub fn available_langids() -> Vec<LanguageIdentifier> {
    available_locales()
        .iter()
        .filter_map(|tag| tag.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_language_is_present() {
        let langs = available_locales();
        assert!(langs.iter().any(|l| l == "en"));
        assert!(langs.iter().any(|l| l == "pt-BR"));
    }

    #[test]
    fn every_supported_locale_is_embedded() {
        let embedded = available_langids();
        for locale in Locale::ALL {
            assert!(embedded.contains(&locale.langid()), "{locale} not embedded");
        }
    }

    #[test]
    fn basic_lookup_works() {
        let tr = Translator::new(Locale::En);
        assert_eq!(crate::t!(tr, "nav-overview"), "Overview");
    }

    #[test]
    fn portuguese_bundle_is_selected() {
        let tr = Translator::new(Locale::PtBr);
        assert_eq!(crate::t!(tr, "nav-overview"), "Visão geral");
        assert_eq!(tr.locale(), Locale::PtBr);
    }

    #[test]
    fn translators_are_independent() {
        let en = Translator::new(Locale::En);
        let pt = Translator::new(Locale::PtBr);
        assert_ne!(crate::t!(en, "nav-genres"), crate::t!(pt, "nav-genres"));
        assert_eq!(en, Translator::new(Locale::En));
    }

    #[test]
    fn arguments_are_interpolated_without_isolation_marks() {
        let tr = Translator::new(Locale::En);
        let text = crate::t!(tr, "decade-heading", decade = "1990");
        assert_eq!(text, "1990s");

        let mut args = HashMap::new();
        args.insert("decade", "1980".to_string());
        assert_eq!(tr.get_args("decade-heading", args), "1980s");

        let pt = Translator::new(Locale::PtBr);
        let text = crate::t!(pt, "decade-heading", decade = "2000");
        assert_eq!(text, "2000s");
    }

    #[test]
    fn dynamic_lookup_reports_presence() {
        let tr = Translator::new(Locale::En);
        assert!(tr.has("table-empty"));
        assert!(!tr.has("no-such-message"));
    }
}
