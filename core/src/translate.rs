//! Key-based text lookup in the device language.
//!
//! # Design
//! The active language is read once, at construction, from a
//! [`Localization`] collaborator. Lookups never fail: a missing key or a key
//! without an entry for the active language logs a warning and yields the
//! key itself, so untranslated widgets still show something readable.

use std::collections::HashMap;
use std::env;

/// `key -> language code -> text`.
pub type Translations = HashMap<String, HashMap<String, String>>;

/// Host collaborator reporting the active two-letter language code.
pub trait Localization {
    fn language(&self) -> String;
}

/// A language chosen up front.
#[derive(Debug, Clone)]
pub struct FixedLanguage(pub String);

impl Localization for FixedLanguage {
    fn language(&self) -> String {
        self.0.clone()
    }
}

/// Language from the POSIX locale variables, `en` when none is usable.
///
/// Checks `LC_ALL`, `LC_MESSAGES` and `LANG` in that order; `de_CH.UTF-8`
/// becomes `de`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocale;

impl Localization for EnvLocale {
    fn language(&self) -> String {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find_map(|locale| language_code(&locale))
            .unwrap_or_else(|| "en".to_string())
    }
}

fn language_code(locale: &str) -> Option<String> {
    let code: String = locale
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_lowercase();
    // "C" and "POSIX" carry no language.
    (code.len() == 2).then_some(code)
}

#[derive(Debug, Clone)]
pub struct Translator {
    translations: Translations,
    language: String,
}

impl Translator {
    pub fn new(translations: Translations, localization: &impl Localization) -> Self {
        Self {
            translations,
            language: localization.language(),
        }
    }

    /// Build from a JSON object of the form `{"key": {"en": "...", "de": "..."}}`.
    pub fn from_json(json: &str, localization: &impl Localization) -> serde_json::Result<Self> {
        let translations = serde_json::from_str(json)?;
        Ok(Self::new(translations, localization))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Text for `key` in the active language, or `key` itself.
    pub fn get_text<'a>(&'a self, key: &'a str) -> &'a str {
        match self
            .translations
            .get(key)
            .and_then(|by_lang| by_lang.get(&self.language))
        {
            Some(text) => text.as_str(),
            None => {
                tracing::warn!(key, language = %self.language, "translation needed");
                key
            }
        }
    }
}
