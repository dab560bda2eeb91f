//! Reading and writing the translation sheet (CSV).

use std::path::Path;

use crate::error::ConvertError;
use crate::locale::LocaleCode;
use crate::table::{
    TableError,
    TranslationTable,
};

/// Header label of the dotted-key column.
pub const KEY_COLUMN: &str = "Key";

/// Write `table` to `path` as a CSV sheet.
///
/// The header row is `Key` followed by the table's locale columns. The whole
/// sheet is encoded in memory and written in one shot, so a failed run leaves
/// no partial sheet behind.
///
/// # Errors
/// `Sheet` on CSV encoding failure, `Io` on write failure.
pub fn write_sheet(table: &TranslationTable, path: &Path) -> Result<(), ConvertError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![KEY_COLUMN.to_string()];
    header.extend(table.locales().iter().map(|locale| locale.as_str().to_string()));
    writer.write_record(&header).map_err(|source| ConvertError::sheet(path, source))?;

    for key in table.keys() {
        let mut record = vec![key.to_string()];
        for locale in table.locales() {
            record.push(table.cell(key, locale).unwrap_or_default().to_string());
        }
        writer.write_record(&record).map_err(|source| ConvertError::sheet(path, source))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|source| ConvertError::io(path, source.into_error()))?;
    std::fs::write(path, bytes).map_err(|source| ConvertError::io(path, source))?;

    tracing::debug!(path = %path.display(), rows = table.len(), "Wrote translation sheet");
    Ok(())
}

/// Read a CSV sheet back into a translation table.
///
/// Columns may appear in any order. A column whose header is not a valid
/// locale code is skipped with a warning; the `Key` column itself is
/// mandatory.
///
/// # Errors
/// - `Sheet` when the file cannot be opened or a record cannot be decoded.
/// - `MissingKeyColumn` when the header row has no `Key` column.
/// - `DuplicateColumn` / `DuplicateKey` for repeated locales or dotted keys.
pub fn read_sheet(path: &Path) -> Result<TranslationTable, ConvertError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| ConvertError::sheet(path, source))?;

    let headers = reader.headers().map_err(|source| ConvertError::sheet(path, source))?.clone();
    let key_index = headers
        .iter()
        .position(|header| header == KEY_COLUMN)
        .ok_or(ConvertError::Table(TableError::MissingKeyColumn))?;

    let mut columns: Vec<(usize, LocaleCode)> = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if index == key_index {
            continue;
        }
        match LocaleCode::parse(header) {
            Some(code) => columns.push((index, code)),
            None => {
                tracing::warn!(column = header, "Skipping column that is not a locale code");
            }
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ConvertError::sheet(path, source))?;
        let key = record.get(key_index).unwrap_or_default().to_string();
        let cells = columns
            .iter()
            .map(|(index, _)| record.get(*index).map(str::to_string))
            .collect();
        rows.push((key, cells));
    }

    let locales = columns.into_iter().map(|(_, code)| code).collect();
    Ok(TranslationTable::from_columns(locales, rows)?)
}
