//! Bulk mutations: copy, paste, delete and batch apply.
//!
//! Every gesture that touches more than one cell collects its patches into a
//! [`PatchBatch`], one merged patch per record, and submits the batch with a
//! single `update_many` call.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GridEditor;
use crate::clipboard::{ClipboardBuffer, ClipboardWriter};
use crate::error::{Result, XlgridError};
use crate::projection::write_cell;
use crate::store::RecordSink;
use crate::types::{Record, RecordPatch, RecordUpdate};

/// Field set by a batch update over checked rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOperation {
    Status,
    Comments,
    Certifier,
}

impl BatchOperation {
    /// A patch setting exactly this operation's field.
    pub fn patch(self, value: &str) -> RecordPatch {
        let value = Some(value.to_string());
        match self {
            Self::Status => RecordPatch {
                status: value,
                ..RecordPatch::default()
            },
            Self::Comments => RecordPatch {
                comments: value,
                ..RecordPatch::default()
            },
            Self::Certifier => RecordPatch {
                certifier_id: value,
                ..RecordPatch::default()
            },
        }
    }
}

impl FromStr for BatchOperation {
    type Err = XlgridError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "status" => Ok(Self::Status),
            "comments" => Ok(Self::Comments),
            "certifier" => Ok(Self::Certifier),
            other => Err(XlgridError::BatchOperation(other.to_string())),
        }
    }
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Status => "status",
            Self::Comments => "comments",
            Self::Certifier => "certifier",
        })
    }
}

/// Per-record patches in first-touched order.
#[derive(Debug, Default)]
struct PatchBatch {
    updates: Vec<RecordUpdate>,
    slots: HashMap<String, usize>,
}

impl PatchBatch {
    fn slot(&mut self, id: &str) -> Option<&mut RecordPatch> {
        let existing = self.slots.get(id).copied();
        let slot = match existing {
            Some(slot) => slot,
            None => {
                let slot = self.updates.len();
                self.updates
                    .push(RecordUpdate::new(id, RecordPatch::default()));
                self.slots.insert(id.to_string(), slot);
                slot
            }
        };
        self.updates.get_mut(slot).map(|u| &mut u.patch)
    }

    /// Write one cell value into the record's patch.
    fn write(&mut self, record: &Record, column: &str, value: &str) {
        if let Some(patch) = self.slot(&record.id) {
            write_cell(patch, record, column, value);
        }
    }

    fn merge(&mut self, id: &str, patch: RecordPatch) {
        if let Some(existing) = self.slot(id) {
            existing.merge(patch);
        }
    }

    /// Non-empty updates, ready for the sink.
    fn into_updates(self) -> Vec<RecordUpdate> {
        self.updates
            .into_iter()
            .filter(|u| !u.patch.is_empty())
            .collect()
    }
}

impl<S: RecordSink, C: ClipboardWriter> GridEditor<S, C> {
    /// Snapshot the selected cells into the clipboard buffer.
    ///
    /// Rows come out in ascending order, each holding only the columns
    /// selected in that row. The TSV text is also offered to the host
    /// clipboard; a refusal there is logged and otherwise ignored.
    pub fn copy_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let rows: Vec<Vec<String>> = self
            .selection
            .rows()
            .into_iter()
            .map(|(row, cols)| {
                cols.into_iter()
                    .filter_map(|col| self.cell_value(row, col))
                    .collect()
            })
            .collect();

        let buffer = ClipboardBuffer::new(rows);
        let text = buffer.to_tsv();
        tracing::debug!(
            rows = buffer.row_count(),
            cols = buffer.max_row_len(),
            "copied selection"
        );
        self.clipboard = Some(buffer);

        if let Err(e) = self.clipboard_writer.write_text(&text) {
            tracing::warn!(error = %e, "host clipboard unavailable, keeping in-memory copy");
        }
    }

    /// Paste the clipboard buffer with its first cell at the top-left of
    /// the current selection.
    ///
    /// Rows that fall past the last visible record are dropped whole; cells
    /// past the last column are dropped individually.
    pub fn paste_at_selection(&mut self) {
        if !self.config.can_edit {
            return;
        }
        let Some(anchor) = self.selection.top_left() else {
            return;
        };
        let Some(buffer) = self.clipboard.as_ref() else {
            return;
        };
        if buffer.is_empty() {
            return;
        }

        let mut batch = PatchBatch::default();
        for (i, values) in buffer.rows().iter().enumerate() {
            let row = anchor.row + i;
            let Some(record) = self.records.get(row) else {
                tracing::trace!(row, "paste row outside view");
                continue;
            };
            for (j, value) in values.iter().enumerate() {
                let col = anchor.col + j;
                let Some(column) = self.columns.get(col) else {
                    tracing::trace!(row, col, "paste cell outside view");
                    continue;
                };
                batch.write(record, column, value);
            }
        }
        self.submit(batch, "paste");
    }

    /// Load text from the host clipboard as the buffer, then paste it.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TSV; the existing buffer is
    /// left untouched in that case.
    pub fn paste_text(&mut self, text: &str) -> Result<()> {
        self.load_clipboard_text(text)?;
        self.paste_at_selection();
        Ok(())
    }

    /// Replace the clipboard buffer with decoded TSV text.
    ///
    /// # Errors
    /// Returns [`XlgridError::ClipboardText`] for malformed text.
    pub fn load_clipboard_text(&mut self, text: &str) -> Result<()> {
        self.clipboard = Some(ClipboardBuffer::from_tsv(text)?);
        Ok(())
    }

    /// Clear every selected cell, leaving protected columns alone.
    pub fn delete_selection(&mut self) {
        if !self.config.can_edit || self.selection.is_empty() {
            return;
        }
        let mut batch = PatchBatch::default();
        for pos in self.selection.cells() {
            let Some((record, column)) = self.resolve(pos) else {
                continue;
            };
            if self.config.is_protected(column) {
                continue;
            }
            batch.write(record, column, "");
        }
        self.submit(batch, "delete");
    }

    /// Set one field to `value` on every record in `record_ids`.
    ///
    /// Refuses empty values and empty id sets. Returns whether an update
    /// was submitted.
    pub fn batch_apply<I>(&mut self, record_ids: I, operation: BatchOperation, value: &str) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if !self.config.can_edit || value.is_empty() {
            return false;
        }
        let mut batch = PatchBatch::default();
        for id in record_ids {
            batch.merge(id.as_ref(), operation.patch(value));
        }
        self.submit(batch, "batch apply")
    }

    fn submit(&mut self, batch: PatchBatch, gesture: &str) -> bool {
        let updates = batch.into_updates();
        if updates.is_empty() {
            tracing::debug!(gesture, "nothing to update");
            return false;
        }
        tracing::debug!(gesture, records = updates.len(), "submitting batched update");
        self.sink.update_many(updates);
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("status", BatchOperation::Status ; "status")]
    #[test_case("comments", BatchOperation::Comments ; "comments")]
    #[test_case("certifier", BatchOperation::Certifier ; "certifier")]
    fn test_parse_batch_operation(name: &str, expected: BatchOperation) {
        assert_eq!(name.parse::<BatchOperation>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_parse_unknown_batch_operation() {
        let err = "owner".parse::<BatchOperation>().unwrap_err();
        assert!(matches!(err, XlgridError::BatchOperation(name) if name == "owner"));
    }

    #[test]
    fn test_batch_operation_patch_sets_one_field() {
        let patch = BatchOperation::Certifier.patch("u-1");
        assert_eq!(patch.certifier_id.as_deref(), Some("u-1"));
        assert!(patch.status.is_none() && patch.comments.is_none() && patch.data.is_none());
    }

    #[test]
    fn test_patch_batch_merges_per_record() {
        let r1 = Record::new("r1").with_data("A", "1").with_data("B", "2");
        let r2 = Record::new("r2");
        let mut batch = PatchBatch::default();
        batch.write(&r1, "A", "x");
        batch.write(&r2, "status", "Certified");
        batch.write(&r1, "B", "y");
        batch.write(&r1, "id", "ignored");

        let updates = batch.into_updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].id, "r1");
        let data = updates[0].patch.data.as_ref().unwrap();
        assert_eq!(data["A"], "x");
        assert_eq!(data["B"], "y");
        assert_eq!(updates[1].patch.status.as_deref(), Some("Certified"));
    }

    #[test]
    fn test_patch_batch_drops_empty_patches() {
        let r1 = Record::new("r1");
        let mut batch = PatchBatch::default();
        batch.write(&r1, "createdAt", "");
        assert!(batch.into_updates().is_empty());
    }
}
