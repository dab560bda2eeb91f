//! Run settings: conventional locations and their overrides.

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::LocaleCode;

/// Name of the optional settings file, looked up in the working directory.
pub const SETTINGS_FILE_NAME: &str = ".i18n-sheet.json";

/// A single invalid settings field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "keySeparator")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors raised while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for one conversion run.
///
/// Both pipelines receive this struct explicitly; there are no process-wide
/// defaults. Fields left out of the settings file keep their conventional
/// values, and CLI flags override the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetSettings {
    /// Directory holding the `<locale>.json` files (read and written).
    pub locales_dir: PathBuf,

    /// Path of the translation sheet (read and written).
    pub sheet_path: PathBuf,

    /// Separator joining dotted-key segments.
    pub key_separator: String,

    /// Locale listed first in the sheet and processed first when exporting,
    /// so it determines the primary row order.
    pub priority_locale: LocaleCode,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from("locales"),
            sheet_path: PathBuf::from("translations.csv"),
            key_separator: ".".to_string(),
            priority_locale: LocaleCode::default(),
        }
    }
}

impl SheetSettings {
    /// # Errors
    /// - A path field is empty
    /// - The key separator is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.locales_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "localesDir",
                "The locale directory cannot be empty. Example: \"locales\"",
            ));
        }

        if self.sheet_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "sheetPath",
                "The sheet path cannot be empty. Example: \"translations.csv\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Load settings from the settings file in `dir`.
///
/// A missing file is not an error; defaults are returned instead.
///
/// # Errors
/// - File read error
/// - JSON parse error (including an invalid `priorityLocale`)
pub fn load_from_dir(dir: &Path) -> Result<SheetSettings, ConfigError> {
    let config_path = dir.join(SETTINGS_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Settings file not found: {:?}", config_path);
        return Ok(SheetSettings::default());
    }

    tracing::debug!("Loading settings from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: SheetSettings = serde_json::from_str(&content)?;

    Ok(settings)
}
