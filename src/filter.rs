//! Visible-record filtering.
//!
//! Computes the record sequence the grid addresses by row index. Every
//! predicate reads values through the projection so a filter matches what
//! the user sees in the cell.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::projection::read_cell;
use crate::types::Record;

/// Sentinel value meaning "no restriction" for select-style filters.
pub const ALL: &str = "all";

/// How a column filter compares cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFilterKind {
    /// Case-insensitive substring.
    #[default]
    Text,
    /// Case-insensitive equality; `"all"` matches everything.
    Select,
    /// Substring against the rendered date.
    Date,
}

/// A filter on one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
    #[serde(default, rename = "type")]
    pub kind: ColumnFilterKind,
}

impl ColumnFilter {
    fn matches(&self, record: &Record, date_format: &str) -> bool {
        let cell = read_cell(record, &self.column, date_format).to_lowercase();
        let wanted = self.value.to_lowercase();
        match self.kind {
            ColumnFilterKind::Select => wanted == ALL || cell == wanted,
            ColumnFilterKind::Text | ColumnFilterKind::Date => cell.contains(&wanted),
        }
    }
}

/// Global search, status filter and per-column filters, all AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordFilter {
    /// Case-insensitive search over data values, status and comments.
    pub search: String,
    /// Exact status to keep; `None` or `"all"` keeps every status.
    pub status: Option<String>,
    pub column_filters: Vec<ColumnFilter>,
}

impl RecordFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.status.as_deref().is_some_and(|s| s != ALL)
            || !self.column_filters.is_empty()
    }

    /// Add a column filter, replacing any existing filter on the same column.
    pub fn set_column_filter(&mut self, filter: ColumnFilter) {
        match self
            .column_filters
            .iter_mut()
            .find(|f| f.column == filter.column)
        {
            Some(existing) => *existing = filter,
            None => self.column_filters.push(filter),
        }
    }

    pub fn remove_column_filter(&mut self, column: &str) {
        self.column_filters.retain(|f| f.column != column);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, record: &Record, config: &GridConfig) -> bool {
        self.matches_search(record)
            && self.matches_status(record)
            && self
                .column_filters
                .iter()
                .all(|f| f.matches(record, &config.date_format))
    }

    /// The records that pass, in input order.
    pub fn apply(&self, records: &[Record], config: &GridConfig) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.matches(r, config))
            .cloned()
            .collect()
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record
            .data
            .values()
            .any(|v| v.to_lowercase().contains(&needle))
            || record.status.to_lowercase().contains(&needle)
            || record
                .comments
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
    }

    fn matches_status(&self, record: &Record) -> bool {
        match self.status.as_deref() {
            None | Some(ALL) => true,
            Some(status) => record.status == status,
        }
    }
}

/// Distinct non-blank rendered values of a column, sorted.
pub fn unique_column_values(records: &[Record], column: &str, config: &GridConfig) -> Vec<String> {
    records
        .iter()
        .map(|r| read_cell(r, column, &config.date_format))
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
