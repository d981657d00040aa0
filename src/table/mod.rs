//! Record and table data model shared by the crawl and merge pipelines.

mod io;
mod lookup;
mod merge;

pub use io::{read_merge_input, read_table, write_table, write_table_with_columns};
pub use lookup::find_by_identity;
pub use merge::{MergeColumns, TableMerger};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Placeholder for a field that could not be extracted or has no counterpart.
pub const SENTINEL: &str = "N/A";

/// One structured entry: an ordered mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping its original position if it already exists.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of a field, or the sentinel when the record lacks it.
    pub fn get_or_sentinel(&self, field: &str) -> &str {
        self.get(field).unwrap_or(SENTINEL)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered sequence of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of all field names, in the order they are first encountered.
    ///
    /// The first record's field order leads; fields only present on later
    /// records are appended after it.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: IndexSet<&str> = IndexSet::new();
        for record in &self.records {
            columns.extend(record.field_names());
        }
        columns.into_iter().map(str::to_string).collect()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_position_of_existing_field() {
        let mut record: Record = [("a", "1"), ("b", "2")].into_iter().collect();
        record.set("a", "3");
        let fields: Vec<_> = record.fields().collect();
        assert_eq!(fields, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn missing_field_reads_as_sentinel() {
        let record: Record = [("a", "1")].into_iter().collect();
        assert_eq!(record.get_or_sentinel("a"), "1");
        assert_eq!(record.get_or_sentinel("z"), SENTINEL);
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let rows: Vec<Record> = vec![
            [("name", "x"), ("rating", "1")].into_iter().collect(),
            [("name", "y"), ("extra", "e"), ("rating", "2")]
                .into_iter()
                .collect(),
        ];
        let table: Table = rows.into_iter().collect();
        assert_eq!(table.columns(), vec!["name", "rating", "extra"]);
    }

    #[test]
    fn empty_table_has_no_columns() {
        assert!(Table::new().columns().is_empty());
    }
}
