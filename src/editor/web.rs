//! JavaScript bindings for `GridEditor`.
//!
//! Record mutations are forwarded to two JS callbacks, `updateOne(id, patch)`
//! and `updateMany(updates)`; copies are mirrored into
//! `navigator.clipboard`. The host re-sends the visible records after it
//! applies an update or changes a filter.

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{BatchOperation, GridEditor};
use crate::clipboard::ClipboardWriter;
use crate::config::GridConfig;
use crate::error::{Result, XlgridError};
use crate::store::RecordSink;
use crate::types::{Record, RecordPatch, RecordUpdate};

/// Convert to a JS value with maps as plain objects, so `patch.data`
/// arrives as `{column: value}` rather than an ES `Map`.
fn to_js<T: Serialize + ?Sized>(
    value: &T,
) -> std::result::Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Sink that calls back into JavaScript.
struct JsRecordSink {
    update_one: Function,
    update_many: Function,
}

impl RecordSink for JsRecordSink {
    fn update_one(&mut self, id: &str, patch: RecordPatch) {
        let patch = match to_js(&patch) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize patch");
                return;
            }
        };
        if let Err(e) = self
            .update_one
            .call2(&JsValue::NULL, &JsValue::from_str(id), &patch)
        {
            tracing::warn!(error = ?e, "updateOne callback threw");
        }
    }

    fn update_many(&mut self, updates: Vec<RecordUpdate>) {
        let updates = match to_js(&updates) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize updates");
                return;
            }
        };
        if let Err(e) = self.update_many.call1(&JsValue::NULL, &updates) {
            tracing::warn!(error = ?e, "updateMany callback threw");
        }
    }
}

/// `navigator.clipboard.writeText`. The returned promise is not awaited.
struct BrowserClipboard;

impl ClipboardWriter for BrowserClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let window =
            web_sys::window().ok_or_else(|| XlgridError::Clipboard("no window".to_string()))?;
        let clipboard = window.navigator().clipboard();
        let _ = clipboard.write_text(text);
        Ok(())
    }
}

/// The grid editor exported to JavaScript.
#[wasm_bindgen]
pub struct XlGrid {
    editor: GridEditor<JsRecordSink, BrowserClipboard>,
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
impl XlGrid {
    /// Create a grid editor.
    ///
    /// `config` is a partial `GridConfig` object, or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        update_one: Function,
        update_many: Function,
        config: JsValue,
    ) -> std::result::Result<XlGrid, JsValue> {
        console_error_panic_hook::set_once();
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_err)?
        };
        config.validate()?;
        let sink = JsRecordSink {
            update_one,
            update_many,
        };
        Ok(XlGrid {
            editor: GridEditor::with_clipboard(config, sink, BrowserClipboard),
        })
    }

    /// Replace the visible records and data columns.
    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(
        &mut self,
        records: JsValue,
        columns: Vec<String>,
    ) -> std::result::Result<(), JsValue> {
        let records: Vec<Record> = serde_wasm_bindgen::from_value(records).map_err(js_err)?;
        self.editor.set_view(records, columns);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCanEdit)]
    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.editor.set_can_edit(can_edit);
    }

    /// Resolved column order.
    #[wasm_bindgen]
    pub fn columns(&self) -> Vec<String> {
        self.editor.columns().as_slice().to_vec()
    }

    #[wasm_bindgen(js_name = cellValue)]
    pub fn cell_value(&self, row: usize, col: usize) -> Option<String> {
        self.editor.cell_value(row, col)
    }

    // ---- Selection ----

    #[wasm_bindgen(js_name = beginSelection)]
    pub fn begin_selection(&mut self, row: usize, col: usize, additive: bool) {
        self.editor.begin_selection(row, col, additive);
    }

    #[wasm_bindgen(js_name = extendSelection)]
    pub fn extend_selection(&mut self, row: usize, col: usize) {
        self.editor.extend_selection(row, col);
    }

    #[wasm_bindgen(js_name = endSelection)]
    pub fn end_selection(&mut self) {
        self.editor.end_selection();
    }

    #[wasm_bindgen(js_name = isCellSelected)]
    pub fn is_cell_selected(&self, row: usize, col: usize) -> bool {
        self.editor.is_cell_selected(row, col)
    }

    /// Selected cells as `[{row, col}, ...]` in row-major order.
    #[wasm_bindgen(js_name = selectedCells)]
    pub fn selected_cells(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.editor.selection().cells()).map_err(js_err)
    }

    // ---- Editing ----

    #[wasm_bindgen(js_name = enterEditMode)]
    pub fn enter_edit_mode(&mut self, row: usize, col: usize) {
        self.editor.enter_edit_mode(row, col);
    }

    #[wasm_bindgen(js_name = updateEditValue)]
    pub fn update_edit_value(&mut self, value: String) {
        self.editor.update_edit_value(value);
    }

    #[wasm_bindgen(js_name = commitEdit)]
    pub fn commit_edit(&mut self) {
        self.editor.commit_edit();
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) {
        self.editor.cancel_edit();
    }

    #[wasm_bindgen(js_name = isEditing)]
    pub fn is_editing(&self) -> bool {
        self.editor.is_editing()
    }

    #[wasm_bindgen(js_name = editValue)]
    pub fn edit_value(&self) -> Option<String> {
        self.editor.editing().map(|e| e.value.clone())
    }

    #[wasm_bindgen(js_name = isStatusColumn)]
    pub fn is_status_column(&self, column: &str) -> bool {
        self.editor.config().is_status_column(column)
    }

    #[wasm_bindgen(js_name = statusOptions)]
    pub fn status_options(&self, column: &str) -> Vec<String> {
        self.editor.config().status_options_for(column).to_vec()
    }

    // ---- Clipboard and bulk edits ----

    #[wasm_bindgen]
    pub fn copy(&mut self) {
        self.editor.copy_selection();
    }

    #[wasm_bindgen]
    pub fn paste(&mut self) {
        self.editor.paste_at_selection();
    }

    /// Paste text read from the system clipboard.
    #[wasm_bindgen(js_name = pasteText)]
    pub fn paste_text(&mut self, text: &str) -> std::result::Result<(), JsValue> {
        self.editor.paste_text(text)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = deleteSelection)]
    pub fn delete_selection(&mut self) {
        self.editor.delete_selection();
    }

    /// Handle a keydown. Returns `true` if the default action should be prevented.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> bool {
        self.editor.handle_key(key, ctrl)
    }

    // ---- Row checkboxes ----

    #[wasm_bindgen(js_name = toggleRow)]
    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        self.editor.toggle_row(id, checked);
    }

    #[wasm_bindgen(js_name = selectAllRows)]
    pub fn select_all_rows(&mut self, checked: bool) {
        self.editor.select_all_rows(checked);
    }

    #[wasm_bindgen(js_name = allRowsSelected)]
    pub fn all_rows_selected(&self) -> bool {
        self.editor.all_rows_selected()
    }

    #[wasm_bindgen(js_name = isRowSelected)]
    pub fn is_row_selected(&self, id: &str) -> bool {
        self.editor.is_row_selected(id)
    }

    /// Apply `status`, `comments` or `certifier` to every checked row.
    #[wasm_bindgen(js_name = applyBatch)]
    pub fn apply_batch(
        &mut self,
        operation: &str,
        value: &str,
    ) -> std::result::Result<bool, JsValue> {
        let operation: BatchOperation = operation.parse()?;
        Ok(self.editor.apply_batch_to_selected_rows(operation, value))
    }
}
