//! Localized text with a fixed fallback chain

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Languages tried after the requested one, in order
pub const FALLBACK_LANGUAGES: [&str; 2] = ["ru", "en"];

/// Shown when a text has no usable translation at all
pub const PLACEHOLDER_TEXT: &str = "Untitled";

/// Language code → text
///
/// Entries keep document order, so "first available" is the first
/// translation written in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocalizedText(Vec<(String, String)>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-language text
    pub fn single(language: impl Into<String>, text: impl Into<String>) -> Self {
        let mut out = Self::new();
        out.insert(language, text);
        out
    }

    /// Set the text for a language; an existing entry keeps its position
    pub fn insert(&mut self, language: impl Into<String>, text: impl Into<String>) {
        let language = language.into();
        let text = text.into();
        match self.0.iter_mut().find(|entry| entry.0 == language) {
            Some(entry) => entry.1 = text,
            None => self.0.push((language, text)),
        }
    }

    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(language, text);
        self
    }

    /// Exact lookup, no fallback; empty strings count as missing
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, text)| text.as_str())
            .filter(|text| !text.is_empty())
    }

    /// Resolve for display: requested language, then "ru", then "en", then
    /// the first available translation, then [`PLACEHOLDER_TEXT`]
    pub fn resolve(&self, language: &str) -> &str {
        std::iter::once(language)
            .chain(FALLBACK_LANGUAGES)
            .find_map(|lang| self.get(lang))
            .or_else(|| {
                self.0
                    .iter()
                    .map(|(_, text)| text.as_str())
                    .find(|t| !t.is_empty())
            })
            .unwrap_or(PLACEHOLDER_TEXT)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(lang, _)| lang.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|(_, text)| text.is_empty())
    }
}

impl Serialize for LocalizedText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (language, text) in &self.0 {
            map.serialize_entry(language, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = LocalizedText;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an object mapping language codes to text")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut text = LocalizedText::new();
                while let Some((language, value)) = access.next_entry::<String, String>()? {
                    text.insert(language, value);
                }
                Ok(text)
            }
        }

        deserializer.deserialize_map(TextVisitor)
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        let mut text = Self::new();
        for (language, value) in iter {
            text.insert(language, value);
        }
        text
    }
}
