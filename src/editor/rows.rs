//! Row checkbox selection.
//!
//! Rows are tracked by record id rather than position, so checked rows
//! survive filtering and sorting.

use std::collections::BTreeSet;

use super::{BatchOperation, GridEditor};
use crate::clipboard::ClipboardWriter;
use crate::store::RecordSink;

impl<S: RecordSink, C: ClipboardWriter> GridEditor<S, C> {
    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected_rows.insert(id.to_string());
        } else {
            self.selected_rows.remove(id);
        }
    }

    /// Check every visible row, or uncheck every row.
    pub fn select_all_rows(&mut self, checked: bool) {
        if checked {
            self.selected_rows = self.records.iter().map(|r| r.id.clone()).collect();
        } else {
            self.selected_rows.clear();
        }
    }

    /// Whether every visible row is checked. False for an empty view.
    pub fn all_rows_selected(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|r| self.selected_rows.contains(&r.id))
    }

    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selected_rows.contains(id)
    }

    pub fn selected_rows(&self) -> &BTreeSet<String> {
        &self.selected_rows
    }

    /// Run a batch update over the checked rows, unchecking them on success.
    pub fn apply_batch_to_selected_rows(&mut self, operation: BatchOperation, value: &str) -> bool {
        let ids = std::mem::take(&mut self.selected_rows);
        let applied = self.batch_apply(&ids, operation, value);
        if !applied {
            self.selected_rows = ids;
        }
        applied
    }
}
