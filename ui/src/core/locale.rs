//! Supported dashboard locales and how a request's locale is resolved.
//!
//! The set is closed: anything outside it falls back to [`DEFAULT_LOCALE`].
//! Resolution order mirrors what the shell has available:
//! 1. an explicitly stored choice (preference key [`COOKIE_NAME`]),
//! 2. the requested languages (an Accept-Language style list),
//! 3. the default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// Preference key holding the user's explicit locale choice.
pub const COOKIE_NAME: &str = "locale";

pub const DEFAULT_LOCALE: Locale = Locale::En;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::PtBr];

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::PtBr => "pt-BR",
        }
    }

    /// Short label used on the language toggle button.
    pub fn short_label(self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::PtBr => "PT-BR",
        }
    }

    /// Native name shown in the language menu.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::PtBr => "Português (Brasil)",
        }
    }

    pub fn langid(self) -> LanguageIdentifier {
        match self {
            Locale::En => unic_langid::langid!("en"),
            Locale::PtBr => unic_langid::langid!("pt-BR"),
        }
    }

    /// Strict parse of one of the closed-set tags. `None` for anything else.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.tag() == tag)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale tag `{0}`")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// Resolve the locale for one render.
///
/// `stored` is the raw stored preference (if any), `accept_language` the raw
/// requested-languages string. Only an exact closed-set tag is honoured from
/// `stored`; the header is matched by substring.
pub fn resolve_locale(stored: Option<&str>, accept_language: &str) -> Locale {
    if let Some(locale) = stored.and_then(Locale::from_tag) {
        return locale;
    }

    if accept_language.to_lowercase().contains("pt") {
        return Locale::PtBr;
    }

    DEFAULT_LOCALE
}

/// The platform's requested languages rendered as an Accept-Language style list.
pub fn requested_languages_header() -> String {
    requested_languages()
        .iter()
        .map(|lang| lang.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_choice_wins_over_header() {
        assert_eq!(resolve_locale(Some("en"), "pt-BR,pt;q=0.9"), Locale::En);
        assert_eq!(resolve_locale(Some("pt-BR"), "en-US"), Locale::PtBr);
    }

    #[test]
    fn unknown_stored_value_falls_through_to_header() {
        assert_eq!(resolve_locale(Some("fr-FR"), "pt-PT"), Locale::PtBr);
        assert_eq!(resolve_locale(Some("PT-BR"), ""), Locale::En);
    }

    #[test]
    fn header_match_is_case_insensitive_substring() {
        assert_eq!(resolve_locale(None, "en-US,PT;q=0.5"), Locale::PtBr);
        assert_eq!(resolve_locale(None, "de-DE,en;q=0.8"), Locale::En);
    }

    #[test]
    fn empty_inputs_use_default() {
        assert_eq!(resolve_locale(None, ""), DEFAULT_LOCALE);
    }

    #[test]
    fn tags_round_trip_through_from_str() {
        for locale in Locale::ALL {
            assert_eq!(locale.tag().parse::<Locale>(), Ok(locale));
        }
        assert!("es".parse::<Locale>().is_err());
    }

    #[test]
    fn serde_uses_tags() {
        let json = serde_json::to_string(&Locale::PtBr).unwrap();
        assert_eq!(json, "\"pt-BR\"");
    }
}
