//! Top-level error taxonomy for a conversion run.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::flatten::FlattenError;
use crate::locale::LocaleCode;
use crate::table::TableError;
use crate::unflatten::UnflattenError;

/// Any failure that aborts a conversion run.
///
/// Every variant names the offending file, locale, or dotted key where one
/// exists. All errors are fatal: the run stops and nothing further is
/// written.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Flattening one locale's translation tree failed.
    #[error("locale '{locale}': {source}")]
    Flatten {
        /// The locale whose file was being flattened.
        locale: LocaleCode,
        /// The underlying flatten error.
        #[source]
        source: FlattenError,
    },

    /// Rebuilding one locale's translation tree failed.
    #[error("locale '{locale}': {source}")]
    Unflatten {
        /// The locale whose column was being rebuilt.
        locale: LocaleCode,
        /// The underlying unflatten error.
        #[source]
        source: UnflattenError,
    },

    /// Building or decoding the translation table failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// No usable `<locale>.json` file in the locale directory.
    #[error("no locale files found in '{}'", .dir.display())]
    NoLocaleFiles {
        /// The directory that was scanned.
        dir: PathBuf,
    },

    /// File read/write failure.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON in a translation file.
    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        /// The file that failed to parse or serialize.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The translation sheet could not be read or written.
    #[error("sheet '{}': {source}", .path.display())]
    Sheet {
        /// The sheet file involved.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Settings could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ConvertError {
    /// I/O failure at `path`.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// JSON failure at `path`.
    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }

    /// CSV failure at `path`.
    pub(crate) fn sheet(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Sheet { path: path.into(), source }
    }

    /// Flatten failure in `locale`.
    pub(crate) fn flatten(locale: &LocaleCode, source: FlattenError) -> Self {
        Self::Flatten { locale: locale.clone(), source }
    }

    /// Unflatten failure in `locale`.
    pub(crate) fn unflatten(locale: &LocaleCode, source: UnflattenError) -> Self {
        Self::Unflatten { locale: locale.clone(), source }
    }
}
