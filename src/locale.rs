//! Locale code identification and file-name mapping.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Error for a string that is not a valid locale code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid locale code (expected the form 'en-US')")]
pub struct InvalidLocaleCode(String);

/// Identifier for one language/region translation set (e.g. `en-US`).
///
/// A valid code is two lowercase letters, a hyphen, and two uppercase letters.
/// Each code names one `<code>.json` translation file and one sheet column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Parse a locale code, returning `None` if the form is invalid.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let (language, region) = code.split_once('-')?;
        let language_ok = language.len() == 2 && language.chars().all(|c| c.is_ascii_lowercase());
        let region_ok = region.len() == 2 && region.chars().all(|c| c.is_ascii_uppercase());
        (language_ok && region_ok).then(|| Self(code.to_string()))
    }

    /// Detect a locale code from a translation file path.
    ///
    /// Only `<code>.json` file names are recognized; anything else is `None`.
    ///
    /// # Examples
    /// - `locales/en-US.json` → `en-US`
    /// - `locales/strings.json` → `None`
    /// - `locales/en-US.yaml` → `None`
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.extension().is_some_and(|ext| ext == "json") {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Self::parse(stem)
    }

    /// The locale code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The conventional translation file name for this locale.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

/// The conventional priority locale, `en-US`.
impl Default for LocaleCode {
    fn default() -> Self {
        Self("en-US".to_string())
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleCode {
    type Err = InvalidLocaleCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidLocaleCode(s.to_string()))
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = InvalidLocaleCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0
    }
}
