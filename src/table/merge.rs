//! Key-based reconciliation of two rating tables.

use indexmap::IndexMap;
use tracing::{debug, info};

use super::{Record, Table, SENTINEL};

/// Column names the merger reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeColumns {
    /// Field whose value identifies a record in both inputs.
    pub identity: String,
    /// Field holding each source's own rating text.
    pub rating: String,
    /// Output column carrying the first source's rating.
    pub source_a_rating: String,
    /// Output column carrying the second source's rating.
    pub source_b_rating: String,
}

/// Reconciles two tables into one, keyed by the identity column.
pub struct TableMerger {
    columns: MergeColumns,
}

impl TableMerger {
    pub fn new(columns: MergeColumns) -> Self {
        Self { columns }
    }

    /// Merge `a` and `b` into a new table.
    ///
    /// Records from `a` come first in `a`'s order, followed by identities only
    /// present in `b` in `b`'s order. When an identity is in both tables the
    /// record from `a` is kept and `b` only contributes its rating.
    pub fn merge(&self, a: &Table, b: &Table) -> Table {
        let a_rows = self.key_by_identity(a);
        let b_rows = self.key_by_identity(b);

        let mut merged: IndexMap<&str, Record> = IndexMap::with_capacity(a_rows.len());

        for (&identity, &record) in &a_rows {
            let mut entry = record.clone();
            entry.set(
                &self.columns.source_a_rating,
                record.get_or_sentinel(&self.columns.rating),
            );
            entry.set(&self.columns.source_b_rating, SENTINEL);
            merged.insert(identity, entry);
        }

        let mut b_only = 0usize;
        for (&identity, &record) in &b_rows {
            let rating = record.get_or_sentinel(&self.columns.rating);
            match merged.get_mut(identity) {
                Some(existing) => existing.set(&self.columns.source_b_rating, rating),
                None => {
                    let mut entry = record.clone();
                    entry.set(&self.columns.source_a_rating, SENTINEL);
                    entry.set(&self.columns.source_b_rating, rating);
                    merged.insert(identity, entry);
                    b_only += 1;
                }
            }
        }

        info!(
            "Merged {} + {} identities into {} records ({} only in second source)",
            a_rows.len(),
            b_rows.len(),
            merged.len(),
            b_only
        );

        merged.into_values().collect()
    }

    /// Index a table by identity value.
    ///
    /// Rows with a missing or empty identity are skipped. A repeated identity
    /// keeps its first position but takes the values of its last occurrence.
    fn key_by_identity<'t>(&self, table: &'t Table) -> IndexMap<&'t str, &'t Record> {
        let mut keyed = IndexMap::with_capacity(table.len());
        for record in table.records() {
            match record.get(&self.columns.identity) {
                Some(identity) if !identity.is_empty() => {
                    keyed.insert(identity, record);
                }
                _ => debug!(
                    "Skipping row without `{}`: {:?}",
                    self.columns.identity, record
                ),
            }
        }
        keyed
    }
}
