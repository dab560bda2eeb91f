//! The two conversion pipelines.

use crate::config::SheetSettings;
use crate::error::ConvertError;
use crate::files;
use crate::flatten::flatten;
use crate::sheet;
use crate::table::TranslationTable;
use crate::unflatten::unflatten;

/// Convert the locale directory into one translation sheet.
///
/// Locales are processed with the priority locale first and the rest in
/// lexicographic order; that order fixes both the sheet's columns and, via
/// first-seen key union, its rows.
///
/// # Errors
/// Any [`ConvertError`]; on error no sheet is written.
pub fn export_to_sheet(settings: &SheetSettings) -> Result<(), ConvertError> {
    let mut locale_files = files::discover_locale_files(&settings.locales_dir)?;
    if let Some(index) =
        locale_files.iter().position(|(code, _)| code == &settings.priority_locale)
    {
        let priority = locale_files.remove(index);
        locale_files.insert(0, priority);
    }

    let mut per_locale = Vec::with_capacity(locale_files.len());
    for (code, path) in locale_files {
        let tree = files::load_translation_tree(&path)?;
        let entries = flatten(&tree, &settings.key_separator)
            .map_err(|source| ConvertError::flatten(&code, source))?;
        if entries.is_empty() {
            tracing::warn!(
                locale = %code,
                path = %path.display(),
                "Locale file contains no translations"
            );
        }
        per_locale.push((code, entries));
    }

    let table = TranslationTable::build(per_locale, &settings.key_separator)?;
    sheet::write_sheet(&table, &settings.sheet_path)?;
    tracing::info!(
        rows = table.len(),
        locales = table.locales().len(),
        sheet = %settings.sheet_path.display(),
        "Exported translation sheet"
    );
    Ok(())
}

/// Convert the translation sheet back into per-locale JSON files.
///
/// Every locale column is rebuilt in memory before any file is written; a
/// sheet without locale columns produces no files and is only a warning.
///
/// # Errors
/// Any [`ConvertError`]; on error no locale file is written.
pub fn import_from_sheet(settings: &SheetSettings) -> Result<(), ConvertError> {
    let table = sheet::read_sheet(&settings.sheet_path)?;
    if table.locales().is_empty() {
        tracing::warn!(
            sheet = %settings.sheet_path.display(),
            "No locale columns found in the sheet"
        );
        return Ok(());
    }

    let mut trees = Vec::with_capacity(table.locales().len());
    for locale in table.locales() {
        let tree = unflatten(table.locale_entries(locale), &settings.key_separator)
            .map_err(|source| ConvertError::unflatten(locale, source))?;
        trees.push((locale.clone(), tree));
    }

    files::write_locale_files(&trees, &settings.locales_dir)?;
    tracing::info!(
        locales = trees.len(),
        dir = %settings.locales_dir.display(),
        "Imported translation sheet"
    );
    Ok(())
}
