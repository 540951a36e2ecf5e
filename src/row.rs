//! Row data model: ordered, keyed string cells

use std::ops::Index;

use indexmap::IndexMap;

use crate::error::{CsvError, Result};

/// One record's cells, keyed by header name in column order
///
/// A `Row` is simultaneously a sequence of values and a map from header
/// names to values; both views share the same storage, so mutations through
/// one are visible through the other. Mutations only affect the in-memory
/// row, never the source the row was read from.
///
/// # Examples
///
/// ```
/// use csvflow::CsvReader;
///
/// let reader = CsvReader::new();
/// let mut rows = reader.parse_str("name,city\nAlice,NYC");
/// let mut row = rows.next().unwrap().unwrap();
///
/// assert_eq!(row.get("Name"), Some("Alice"));
/// assert_eq!(&row["City"], "NYC");
///
/// row.set("Country", "US");
/// assert_eq!(row.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    /// Build a row from resolved header names and record values
    ///
    /// In strict mode any length mismatch is an error carrying both counts.
    /// Otherwise missing trailing values default to the empty string and
    /// values beyond the headers are dropped.
    pub(crate) fn from_record(
        headers: &[String],
        values: Vec<String>,
        strict: bool,
    ) -> Result<Self> {
        if strict && values.len() != headers.len() {
            return Err(CsvError::InvalidCellCount {
                expected: headers.len(),
                actual: values.len(),
            });
        }
        let mut cells = IndexMap::with_capacity(headers.len());
        let mut values = values.into_iter();
        for header in headers {
            cells.insert(header.clone(), values.next().unwrap_or_default());
        }
        Ok(Row { cells })
    }

    /// Get a cell value by header name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cells.get(name).map(String::as_str)
    }

    /// Set a cell value, inserting the column if it does not exist yet
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.cells.insert(name.into(), value.into());
    }

    /// Remove a column, preserving the order of the remaining ones
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.cells.shift_remove(name)
    }

    /// Check whether a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// Current header names, in column order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Cell values, in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.values().map(String::as_str)
    }

    /// (header, value) pairs, in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of columns currently in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Copy the values out into a vector, in column order
    pub fn to_strings(&self) -> Vec<String> {
        self.cells.values().cloned().collect()
    }
}

impl Index<&str> for Row {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        self.get(name)
            .unwrap_or_else(|| panic!("no column named '{name}'"))
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a str;
    type IntoIter = std::iter::Map<indexmap::map::Values<'a, String, String>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.values().map(String::as_str as fn(&String) -> &str)
    }
}
