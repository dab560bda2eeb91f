//! Locale file discovery, loading, and writing.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use crate::error::ConvertError;
use crate::locale::LocaleCode;

/// Find `<locale>.json` files directly inside `dir`, sorted by locale code.
///
/// Files whose names do not parse as a locale code are ignored; the scan is
/// not recursive.
///
/// # Errors
/// - `Io` when the directory cannot be read.
/// - `NoLocaleFiles` when nothing usable is found.
pub fn discover_locale_files(dir: &Path) -> Result<Vec<(LocaleCode, PathBuf)>, ConvertError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ConvertError::io(dir, source))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ConvertError::io(dir, source))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match LocaleCode::from_path(&path) {
            Some(code) => found.push((code, path)),
            None => {
                tracing::debug!(path = %path.display(), "Skipping non-locale file");
            }
        }
    }

    if found.is_empty() {
        return Err(ConvertError::NoLocaleFiles { dir: dir.to_path_buf() });
    }
    found.sort();
    Ok(found)
}

/// Read and parse one locale's translation tree.
///
/// # Errors
/// - `Io` when the file cannot be read (including non-UTF-8 content).
/// - `Json` when the content is not valid JSON.
pub fn load_translation_tree(path: &Path) -> Result<Value, ConvertError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| ConvertError::io(path, source))?;
    serde_json::from_str(&content).map_err(|source| ConvertError::json(path, source))
}

/// Write one `<locale>.json` per tree into `dir`, creating it if needed.
///
/// Every tree is serialized before the first byte hits disk. Files are
/// pretty-printed with non-ASCII text written verbatim.
///
/// # Errors
/// - `Json` when a tree cannot be serialized.
/// - `Io` when the directory or a file cannot be written.
pub fn write_locale_files(trees: &[(LocaleCode, Value)], dir: &Path) -> Result<(), ConvertError> {
    let mut payloads = Vec::with_capacity(trees.len());
    for (code, tree) in trees {
        let path = dir.join(code.file_name());
        let mut text = serde_json::to_string_pretty(tree)
            .map_err(|source| ConvertError::json(&path, source))?;
        text.push('\n');
        payloads.push((path, text));
    }

    std::fs::create_dir_all(dir).map_err(|source| ConvertError::io(dir, source))?;
    for (path, text) in payloads {
        std::fs::write(&path, text).map_err(|source| ConvertError::io(&path, source))?;
        tracing::info!(path = %path.display(), "Wrote locale file");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn locale(code: &str) -> LocaleCode {
        LocaleCode::parse(code).unwrap()
    }

    #[googletest::test]
    fn test_discover_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("fr-FR.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("en-US.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::write(temp_dir.path().join("strings.json"), "{}").unwrap();

        let found = discover_locale_files(temp_dir.path()).unwrap();

        let codes: Vec<&str> = found.iter().map(|(code, _)| code.as_str()).collect();
        expect_that!(codes, elements_are![eq(&"en-US"), eq(&"fr-FR")]);
    }

    #[googletest::test]
    fn test_discover_empty_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = discover_locale_files(temp_dir.path());

        assert!(matches!(result, Err(ConvertError::NoLocaleFiles { .. })));
    }

    #[googletest::test]
    fn test_discover_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = discover_locale_files(&missing);

        assert!(matches!(result, Err(ConvertError::Io { .. })));
    }

    #[googletest::test]
    fn test_load_translation_tree() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en-US.json");
        fs::write(&path, r#"{"common":{"ok":"OK"}}"#).unwrap();

        let tree = load_translation_tree(&path).unwrap();

        assert_eq!(tree, json!({"common": {"ok": "OK"}}));
    }

    #[googletest::test]
    fn test_load_translation_tree_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en-US.json");
        fs::write(&path, "not json").unwrap();

        let result = load_translation_tree(&path);

        assert!(matches!(result, Err(ConvertError::Json { .. })));
    }

    #[googletest::test]
    fn test_write_locale_files_creates_directory_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("out");
        let trees = vec![
            (locale("en-US"), json!({"common": {"ok": "OK"}})),
            (locale("ja-JP"), json!({"common": {"ok": "承知"}})),
        ];

        write_locale_files(&trees, &out_dir).unwrap();

        let en = fs::read_to_string(out_dir.join("en-US.json")).unwrap();
        expect_that!(en, eq("{\n  \"common\": {\n    \"ok\": \"OK\"\n  }\n}\n"));

        // Non-ASCII text is written verbatim, not escaped.
        let ja = fs::read_to_string(out_dir.join("ja-JP.json")).unwrap();
        expect_that!(ja, contains_substring("承知"));
    }
}
