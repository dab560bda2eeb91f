//! The translation table: one row per dotted key, one column per locale.

use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

use crate::flatten::FlatEntry;
use crate::locale::LocaleCode;

/// Errors produced while building or decoding a translation table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A dotted key is a leaf in one locale and an internal node in another.
    #[error(
        "structural conflict: '{leaf_key}' is a value in locale '{leaf_locale}' \
         but '{nested_key}' in locale '{nested_locale}' nests below it"
    )]
    StructuralConflict {
        /// Dotted key that holds a plain string value.
        leaf_key: String,
        /// A locale in which `leaf_key` is a leaf.
        leaf_locale: LocaleCode,
        /// Dotted key that nests underneath `leaf_key`.
        nested_key: String,
        /// A locale in which `nested_key` is a leaf.
        nested_locale: LocaleCode,
    },

    /// The table header has no `Key` column.
    #[error("malformed table: no 'Key' column in the header row")]
    MissingKeyColumn,

    /// The same locale appears as two columns.
    #[error("malformed table: duplicate column for locale '{locale}'")]
    DuplicateColumn {
        /// The locale that appears twice.
        locale: LocaleCode,
    },

    /// The same dotted key appears in two rows.
    #[error("malformed table: duplicate row for key '{key}'")]
    DuplicateKey {
        /// The dotted key that appears twice.
        key: String,
    },
}

/// Tabular form of a set of translation trees.
///
/// Row identity is the dotted key; row order is first-seen order across the
/// locales the table was built from. A missing cell means the locale has no
/// value at that key.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    /// Column order.
    locales: Vec<LocaleCode>,
    /// Dotted key → locale → value. Rows keep first-seen order.
    rows: IndexMap<String, HashMap<LocaleCode, String>>,
}

impl TranslationTable {
    /// Build a table from per-locale flat entries (the Table Builder).
    ///
    /// Column order is the processing order given; row order is the union of
    /// dotted keys in first-seen order, so the first locale determines the
    /// primary ordering and keys unique to later locales are appended.
    ///
    /// # Errors
    /// - `DuplicateColumn` if a locale appears twice in the input.
    /// - `StructuralConflict` if any dotted key is a strict `separator`-boundary
    ///   prefix of another (leaf vs. internal node disagreement).
    pub fn build(
        per_locale: Vec<(LocaleCode, Vec<FlatEntry>)>,
        separator: &str,
    ) -> Result<Self, TableError> {
        let mut locales = Vec::with_capacity(per_locale.len());
        let mut rows: IndexMap<String, HashMap<LocaleCode, String>> = IndexMap::new();

        for (locale, entries) in per_locale {
            if locales.contains(&locale) {
                return Err(TableError::DuplicateColumn { locale });
            }
            for entry in entries {
                rows.entry(entry.key).or_default().insert(locale.clone(), entry.value);
            }
            locales.push(locale);
        }

        let table = Self { locales, rows };
        table.check_conflicts(separator)?;
        Ok(table)
    }

    /// Reassemble a table from decoded columns and rows (the sheet side).
    ///
    /// Empty and missing cells are both recorded as absent.
    ///
    /// # Errors
    /// - `DuplicateColumn` if a locale appears twice.
    /// - `DuplicateKey` if a dotted key appears in two rows.
    pub fn from_columns(
        locales: Vec<LocaleCode>,
        rows: Vec<(String, Vec<Option<String>>)>,
    ) -> Result<Self, TableError> {
        for (index, locale) in locales.iter().enumerate() {
            if locales.get(..index).is_some_and(|seen| seen.contains(locale)) {
                return Err(TableError::DuplicateColumn { locale: locale.clone() });
            }
        }

        let mut table_rows: IndexMap<String, HashMap<LocaleCode, String>> = IndexMap::new();
        for (key, cells) in rows {
            if table_rows.contains_key(&key) {
                return Err(TableError::DuplicateKey { key });
            }
            let mut row = HashMap::new();
            for (locale, cell) in locales.iter().zip(cells) {
                if let Some(value) = cell.filter(|value| !value.is_empty()) {
                    row.insert(locale.clone(), value);
                }
            }
            table_rows.insert(key, row);
        }

        Ok(Self { locales, rows: table_rows })
    }

    /// Column order.
    #[must_use]
    pub fn locales(&self) -> &[LocaleCode] {
        &self.locales
    }

    /// Dotted keys in row order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// The value of one cell, if the locale has one at that key.
    #[must_use]
    pub fn cell(&self, key: &str, locale: &LocaleCode) -> Option<&str> {
        self.rows.get(key)?.get(locale).map(String::as_str)
    }

    /// Project one locale column back into flat entries (the Table Reader).
    ///
    /// Empty cells produce no entry at all; row order is preserved.
    #[must_use]
    pub fn locale_entries(&self, locale: &LocaleCode) -> Vec<FlatEntry> {
        self.rows
            .iter()
            .filter_map(|(key, row)| {
                row.get(locale).map(|value| FlatEntry::new(key.clone(), value.clone()))
            })
            .collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reject key sets where one key nests below another key's value.
    ///
    /// A key only counts as a leaf if some locale actually holds a value at
    /// it, so an all-empty row cannot conflict.
    fn check_conflicts(&self, separator: &str) -> Result<(), TableError> {
        for nested_key in self.rows.keys() {
            for (position, _) in nested_key.match_indices(separator) {
                let Some(prefix) = nested_key.get(..position) else {
                    continue;
                };
                if !self.rows.contains_key(prefix) {
                    continue;
                }
                let (Some(leaf_locale), Some(nested_locale)) =
                    (self.first_locale_with(prefix), self.first_locale_with(nested_key))
                else {
                    continue;
                };
                return Err(TableError::StructuralConflict {
                    leaf_key: prefix.to_string(),
                    leaf_locale,
                    nested_key: nested_key.clone(),
                    nested_locale,
                });
            }
        }
        Ok(())
    }

    /// First locale (in column order) holding a value at `key`.
    fn first_locale_with(&self, key: &str) -> Option<LocaleCode> {
        self.locales.iter().find(|locale| self.cell(key, locale).is_some()).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn locale(code: &str) -> LocaleCode {
        LocaleCode::parse(code).unwrap()
    }

    fn entries(pairs: &[(&str, &str)]) -> Vec<FlatEntry> {
        pairs.iter().map(|(k, v)| FlatEntry::new(*k, *v)).collect()
    }

    #[googletest::test]
    fn test_build_unions_keys_in_first_seen_order() {
        let table = TranslationTable::build(
            vec![
                (locale("en-US"), entries(&[("common.ok", "OK")])),
                (
                    locale("fr-FR"),
                    entries(&[("common.ok", "D'accord"), ("common.cancel", "Annuler")]),
                ),
            ],
            ".",
        )
        .unwrap();

        let keys: Vec<&str> = table.keys().collect();
        expect_that!(keys, elements_are![eq(&"common.ok"), eq(&"common.cancel")]);
        expect_that!(table.len(), eq(2));
    }

    #[googletest::test]
    fn test_build_cells_and_empty_cells() {
        let en = locale("en-US");
        let fr = locale("fr-FR");
        let table = TranslationTable::build(
            vec![
                (en.clone(), entries(&[("common.ok", "OK")])),
                (fr.clone(), entries(&[("common.ok", "D'accord"), ("common.cancel", "Annuler")])),
            ],
            ".",
        )
        .unwrap();

        expect_that!(table.cell("common.ok", &en), some(eq("OK")));
        expect_that!(table.cell("common.ok", &fr), some(eq("D'accord")));
        expect_that!(table.cell("common.cancel", &en), none());
        expect_that!(table.cell("common.cancel", &fr), some(eq("Annuler")));
    }

    #[googletest::test]
    fn test_build_rejects_duplicate_locale() {
        let result = TranslationTable::build(
            vec![
                (locale("en-US"), entries(&[("a", "1")])),
                (locale("en-US"), entries(&[("b", "2")])),
            ],
            ".",
        );

        expect_that!(
            result,
            err(eq(&TableError::DuplicateColumn { locale: locale("en-US") }))
        );
    }

    #[googletest::test]
    fn test_build_detects_structural_conflict_across_locales() {
        let result = TranslationTable::build(
            vec![
                (locale("en-US"), entries(&[("a.b", "x")])),
                (locale("fr-FR"), entries(&[("a.b.c", "y")])),
            ],
            ".",
        );

        expect_that!(
            result,
            err(eq(&TableError::StructuralConflict {
                leaf_key: "a.b".to_string(),
                leaf_locale: locale("en-US"),
                nested_key: "a.b.c".to_string(),
                nested_locale: locale("fr-FR"),
            }))
        );
    }

    #[rstest]
    #[case::sibling_keys(&[("a.b", "x")], &[("a.c", "y")])]
    #[case::shared_prefix_not_a_key(&[("a.b.c", "x")], &[("a.b.d", "y")])]
    #[case::substring_but_not_dot_boundary(&[("ab", "x")], &[("ab.c", "y")])]
    fn test_build_accepts_non_conflicting_keys(
        #[case] first: &[(&str, &str)],
        #[case] second: &[(&str, &str)],
    ) {
        let result = TranslationTable::build(
            vec![(locale("en-US"), entries(first)), (locale("fr-FR"), entries(second))],
            ".",
        );

        assert_that!(result, ok(anything()));
    }

    #[googletest::test]
    fn test_locale_entries_skips_empty_cells_in_row_order() {
        let en = locale("en-US");
        let fr = locale("fr-FR");
        let table = TranslationTable::build(
            vec![
                (en.clone(), entries(&[("common.ok", "OK")])),
                (fr.clone(), entries(&[("common.ok", "D'accord"), ("common.cancel", "Annuler")])),
            ],
            ".",
        )
        .unwrap();

        expect_that!(
            table.locale_entries(&en),
            elements_are![eq(&FlatEntry::new("common.ok", "OK"))]
        );
        expect_that!(
            table.locale_entries(&fr),
            elements_are![
                eq(&FlatEntry::new("common.ok", "D'accord")),
                eq(&FlatEntry::new("common.cancel", "Annuler")),
            ]
        );
    }

    #[googletest::test]
    fn test_from_columns_treats_empty_string_as_absent() {
        let en = locale("en-US");
        let table = TranslationTable::from_columns(
            vec![en.clone()],
            vec![
                ("a".to_string(), vec![Some("1".to_string())]),
                ("b".to_string(), vec![Some(String::new())]),
                ("c".to_string(), vec![None]),
            ],
        )
        .unwrap();

        expect_that!(table.cell("a", &en), some(eq("1")));
        expect_that!(table.cell("b", &en), none());
        expect_that!(table.cell("c", &en), none());
        expect_that!(table.len(), eq(3));
    }

    #[googletest::test]
    fn test_from_columns_rejects_duplicate_key() {
        let result = TranslationTable::from_columns(
            vec![locale("en-US")],
            vec![
                ("a".to_string(), vec![Some("1".to_string())]),
                ("a".to_string(), vec![Some("2".to_string())]),
            ],
        );

        expect_that!(result, err(eq(&TableError::DuplicateKey { key: "a".to_string() })));
    }

    #[googletest::test]
    fn test_from_columns_rejects_duplicate_column() {
        let result = TranslationTable::from_columns(
            vec![locale("en-US"), locale("en-US")],
            vec![],
        );

        expect_that!(
            result,
            err(eq(&TableError::DuplicateColumn { locale: locale("en-US") }))
        );
    }

    #[googletest::test]
    fn test_empty_table() {
        let table = TranslationTable::build(vec![], ".").unwrap();

        expect_that!(table.is_empty(), eq(true));
        expect_that!(table.locales(), is_empty());
    }
}
