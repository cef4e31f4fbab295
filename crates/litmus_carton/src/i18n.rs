//! Internationalization (i18n) for litmus messages.
//!
//! Messages are embedded as flat JSON objects, one per locale, and loaded
//! once on first use. Lookups fall back to English, then to the key itself.
//!
//! ## Supported Locales
//!
//! - `en` - English (default, always available)
//! - `ja` - Japanese
//! - `zh` - Chinese (Simplified)
//!
//! ## Usage
//!
//! ```
//! use litmus_carton::i18n::{t, t_fmt, Locale};
//!
//! let msg = t(Locale::En, "lint.attribute_value_entities.unencoded");
//! assert!(msg.contains("&gt;"));
//!
//! let help = t_fmt(
//!     Locale::En,
//!     "lint.attribute_value_entities.help",
//!     &[("char", ">"), ("entity", "&gt;"), ("attr", "title")],
//! );
//! assert!(help.contains("title"));
//! ```

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::str::FromStr;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Locale {
    /// English (default)
    #[default]
    En = 0,
    /// Japanese
    Ja = 1,
    /// Chinese (Simplified)
    Zh = 2,
}

/// Error type for parsing Locale from string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLocaleError;

impl std::fmt::Display for ParseLocaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid locale string")
    }
}

impl std::error::Error for ParseLocaleError {}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        match s.as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            "ja" | "ja-jp" | "japanese" => Ok(Self::Ja),
            "zh" | "zh-cn" | "zh-hans" | "chinese" => Ok(Self::Zh),
            _ => Err(ParseLocaleError),
        }
    }
}

impl Locale {
    /// All available locales
    pub const ALL: &'static [Locale] = &[Locale::En, Locale::Ja, Locale::Zh];

    /// Try to parse locale from string (case-insensitive)
    #[inline]
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Message lookup table, indexed by [locale][key]
pub struct Translator {
    messages: [FxHashMap<String, String>; 3],
}

impl Translator {
    /// Get the global translator
    #[inline]
    pub fn global() -> &'static Self {
        &GLOBAL_TRANSLATOR
    }

    /// Get a message without variable substitution
    ///
    /// Returns the English fallback if the key is not found in the requested locale.
    /// Returns the key itself if not found in any locale.
    pub fn get<'t>(&'t self, locale: Locale, key: &str) -> Cow<'t, str> {
        if let Some(msg) = self.messages[locale.index()].get(key) {
            return Cow::Borrowed(msg.as_str());
        }

        if locale != Locale::En {
            if let Some(msg) = self.messages[Locale::En.index()].get(key) {
                return Cow::Borrowed(msg.as_str());
            }
        }

        Cow::Owned(key.to_string())
    }

    /// Get a message with `{name}` placeholders substituted
    pub fn format(&self, locale: Locale, key: &str, vars: &[(&str, &str)]) -> String {
        let mut result = self.get(locale, key).into_owned();
        for (name, value) in vars {
            result = result.replace(&format!("{{{name}}}"), value);
        }
        result
    }

    /// Check if a key exists for a locale (without fallback)
    #[inline]
    pub fn has_key(&self, locale: Locale, key: &str) -> bool {
        self.messages[locale.index()].contains_key(key)
    }
}

static GLOBAL_TRANSLATOR: Lazy<Translator> = Lazy::new(|| Translator {
    messages: [
        load_json(include_str!("i18n/en.json")),
        load_json(include_str!("i18n/ja.json")),
        load_json(include_str!("i18n/zh.json")),
    ],
});

/// Embedded catalogs are flat `{ "key": "message" }` objects. A malformed
/// catalog yields an empty table so lookups fall back instead of panicking.
fn load_json(json: &str) -> FxHashMap<String, String> {
    serde_json::from_str(json).unwrap_or_default()
}

/// Translate a message
#[inline]
pub fn t(locale: Locale, key: &str) -> Cow<'static, str> {
    Translator::global().get(locale, key)
}

/// Translate a message with variables
#[inline]
pub fn t_fmt(locale: Locale, key: &str, vars: &[(&str, &str)]) -> String {
    Translator::global().format(locale, key, vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("JA-JP".parse::<Locale>(), Ok(Locale::Ja));
        assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::Zh));
        assert!("unknown".parse::<Locale>().is_err());
    }

    #[test]
    fn test_catalogs_share_keys() {
        let translator = Translator::global();
        for locale in Locale::ALL {
            assert!(translator.has_key(*locale, "lint.attribute_value_entities.unencoded"));
            assert!(translator.has_key(*locale, "lint.attribute_value_entities.help"));
        }
    }

    #[test]
    fn test_english_message() {
        assert_eq!(
            t(Locale::En, "lint.attribute_value_entities.unencoded"),
            "Attribute values may not contain unencoded HTML entities, e.g. use `&gt;` instead of `>`"
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(t(Locale::Ja, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_format_substitutes_all_vars() {
        let msg = t_fmt(
            Locale::En,
            "cli.too_many_warnings",
            &[("count", "12"), ("max", "10")],
        );
        assert_eq!(msg, "Too many warnings (12 > max 10)");
    }
}
