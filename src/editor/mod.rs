//! Grid selection, editing and clipboard engine.
//!
//! `GridEditor` owns everything that is addressed by `(row, col)`:
//! - the selected-cell set (drag rectangle or ctrl-click set)
//! - the single in-progress cell edit
//! - the clipboard buffer of the last copy
//!
//! Records themselves belong to the host. The editor reads the visible
//! records it was given and reports mutations to a [`RecordSink`].
//! No gesture returns an error; invalid input degrades to a no-op.

mod keys;
mod mutation;
mod rows;
#[cfg(target_arch = "wasm32")]
mod web;

use std::collections::BTreeSet;

pub use mutation::BatchOperation;
#[cfg(target_arch = "wasm32")]
pub use web::XlGrid;

use crate::clipboard::{ClipboardBuffer, ClipboardWriter, NoClipboard};
use crate::config::GridConfig;
use crate::projection::{read_cell, write_cell};
use crate::store::RecordSink;
use crate::types::{CellPosition, ColumnLayout, Record, RecordPatch, Selection, SelectionRange};

/// The cell being edited and its uncommitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub cell: CellPosition,
    pub value: String,
}

/// Selection, edit and clipboard state over a visible record grid.
pub struct GridEditor<S, C = NoClipboard> {
    config: GridConfig,
    records: Vec<Record>,
    data_columns: Vec<String>,
    columns: ColumnLayout,
    selection: Selection,
    range: Option<SelectionRange>,
    dragging: bool,
    editing: Option<EditState>,
    clipboard: Option<ClipboardBuffer>,
    selected_rows: BTreeSet<String>,
    sink: S,
    clipboard_writer: C,
}

impl<S: RecordSink> GridEditor<S, NoClipboard> {
    /// Create an editor whose copies stay in its own buffer.
    pub fn new(config: GridConfig, sink: S) -> Self {
        Self::with_clipboard(config, sink, NoClipboard)
    }
}

impl<S: RecordSink, C: ClipboardWriter> GridEditor<S, C> {
    /// Create an editor that mirrors copies into a host clipboard.
    pub fn with_clipboard(config: GridConfig, sink: S, clipboard_writer: C) -> Self {
        let columns = ColumnLayout::resolve(&[], &config);
        Self {
            config,
            records: Vec::new(),
            data_columns: Vec::new(),
            columns,
            selection: Selection::default(),
            range: None,
            dragging: false,
            editing: None,
            clipboard: None,
            selected_rows: BTreeSet::new(),
            sink,
            clipboard_writer,
        }
    }

    // ---- View ----

    /// Replace the visible records and data columns.
    ///
    /// Cell positions are relative to this view, so any change in record
    /// order, membership or column layout clears the selection and the
    /// in-progress edit. The clipboard buffer is kept.
    pub fn set_view(&mut self, records: Vec<Record>, data_columns: Vec<String>) {
        let columns = ColumnLayout::resolve(&data_columns, &self.config);
        let same_rows = self.records.len() == records.len()
            && self.records.iter().zip(&records).all(|(a, b)| a.id == b.id);
        let same_columns = columns == self.columns;

        self.records = records;
        self.data_columns = data_columns;
        self.columns = columns;

        if !(same_rows && same_columns) {
            self.invalidate();
        }
    }

    /// Replace the visible records, keeping the column layout.
    pub fn set_records(&mut self, records: Vec<Record>) {
        let data_columns = std::mem::take(&mut self.data_columns);
        self.set_view(records, data_columns);
    }

    /// Replace the configuration. A changed column layout invalidates the view.
    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
        let columns = ColumnLayout::resolve(&self.data_columns, &self.config);
        if columns != self.columns {
            self.columns = columns;
            self.invalidate();
        }
    }

    /// Turning editing off also ends any drag in progress.
    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.config.can_edit = can_edit;
        if !can_edit {
            self.dragging = false;
        }
    }

    fn invalidate(&mut self) {
        if !self.selection.is_empty() || self.editing.is_some() {
            tracing::debug!(
                cells = self.selection.len(),
                editing = self.editing.is_some(),
                "view changed, clearing selection"
            );
        }
        self.clear_selection();
        self.editing = None;
    }

    // ---- Selection ----

    /// Start a selection gesture at `(row, col)`.
    ///
    /// With `additive` (ctrl/cmd held) the cell's membership is toggled and
    /// no drag starts. Otherwise the selection becomes that one cell and a
    /// drag begins.
    pub fn begin_selection(&mut self, row: usize, col: usize, additive: bool) {
        if !self.config.can_edit || !self.in_bounds(row, col) {
            return;
        }
        let pos = CellPosition::new(row, col);
        if additive {
            self.selection.toggle(pos);
            tracing::debug!(row, col, cells = self.selection.len(), "toggled cell");
        } else {
            let range = SelectionRange::at(pos);
            self.range = Some(range);
            self.selection = Selection::Rectangle(range);
            self.dragging = true;
            tracing::debug!(row, col, "selection started");
        }
    }

    /// Move the drag end to `(row, col)`. Ignored when no drag is active.
    pub fn extend_selection(&mut self, row: usize, col: usize) {
        if !self.config.can_edit || !self.dragging || !self.in_bounds(row, col) {
            return;
        }
        let Some(range) = self.range.as_mut() else {
            return;
        };
        range.end = CellPosition::new(row, col);
        self.selection = Selection::Rectangle(*range);
    }

    /// Finish the drag. The selection stays as it is.
    pub fn end_selection(&mut self) {
        self.dragging = false;
    }

    /// Drop the selected-cell set and any range anchor.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
        self.range = None;
        self.dragging = false;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_cell_selected(&self, row: usize, col: usize) -> bool {
        self.selection.contains(CellPosition::new(row, col))
    }

    // ---- Editing ----

    /// Open `(row, col)` for editing, committing any edit already open.
    pub fn enter_edit_mode(&mut self, row: usize, col: usize) {
        if !self.config.can_edit {
            return;
        }
        if self.editing.is_some() {
            self.commit_edit();
        }
        let Some(value) = self.cell_value(row, col) else {
            return;
        };
        self.editing = Some(EditState {
            cell: CellPosition::new(row, col),
            value,
        });
    }

    pub fn update_edit_value(&mut self, value: impl Into<String>) {
        if let Some(edit) = self.editing.as_mut() {
            edit.value = value.into();
        }
    }

    /// Write the edit back through the projection and close it.
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.editing.take() else {
            return;
        };
        if !self.config.can_edit {
            return;
        }
        let Some((record, column)) = self.resolve(edit.cell) else {
            return;
        };
        let mut patch = RecordPatch::default();
        if !write_cell(&mut patch, record, column, &edit.value) {
            tracing::debug!(column, "edit on read-only column dropped");
            return;
        }
        let id = record.id.clone();
        tracing::debug!(id = %id, row = edit.cell.row, col = edit.cell.col, "committing edit");
        self.sink.update_one(&id, patch);
    }

    /// Close the edit without writing anything.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    // ---- Accessors ----

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    pub fn clipboard(&self) -> Option<&ClipboardBuffer> {
        self.clipboard.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn clipboard_writer(&self) -> &C {
        &self.clipboard_writer
    }

    /// Rendered value of a visible cell.
    pub fn cell_value(&self, row: usize, col: usize) -> Option<String> {
        let (record, column) = self.resolve(CellPosition::new(row, col))?;
        Some(read_cell(record, column, &self.config.date_format))
    }

    fn resolve(&self, pos: CellPosition) -> Option<(&Record, &str)> {
        Some((self.records.get(pos.row)?, self.columns.get(pos.col)?))
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.records.len() && col < self.columns.len()
    }
}
