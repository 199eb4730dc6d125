//! Common test fixtures for grid editor tests.
//!
//! Provides a sink that records every callback, a clipboard that can be told
//! to refuse writes, and builders for small record grids.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::BTreeMap;

use xlgrid::{
    ClipboardWriter, GridConfig, GridEditor, Record, RecordPatch, RecordSink, RecordUpdate,
    XlgridError,
};

// ============================================================================
// Recording sink
// ============================================================================

/// One callback received by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    One(String, RecordPatch),
    Many(Vec<RecordUpdate>),
}

/// Sink that remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn one_calls(&self) -> Vec<(String, RecordPatch)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::One(id, patch) => Some((id.clone(), patch.clone())),
                SinkCall::Many(_) => None,
            })
            .collect()
    }

    pub fn many_calls(&self) -> Vec<Vec<RecordUpdate>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SinkCall::Many(updates) => Some(updates.clone()),
                SinkCall::One(..) => None,
            })
            .collect()
    }

    /// The single `update_many` call, failing the test if there was not exactly one.
    pub fn only_batch(&self) -> Vec<RecordUpdate> {
        let many = self.many_calls();
        assert_eq!(many.len(), 1, "expected exactly one update_many call");
        assert!(self.one_calls().is_empty(), "unexpected update_one call");
        many.into_iter().next().unwrap()
    }
}

impl RecordSink for RecordingSink {
    fn update_one(&mut self, id: &str, patch: RecordPatch) {
        self.calls.push(SinkCall::One(id.to_string(), patch));
    }

    fn update_many(&mut self, updates: Vec<RecordUpdate>) {
        self.calls.push(SinkCall::Many(updates));
    }
}

// ============================================================================
// Clipboard
// ============================================================================

/// Host clipboard double; set `deny` to simulate a permission refusal.
#[derive(Debug, Default)]
pub struct TestClipboard {
    pub deny: bool,
    pub writes: Vec<String>,
}

impl ClipboardWriter for TestClipboard {
    fn write_text(&mut self, text: &str) -> xlgrid::Result<()> {
        if self.deny {
            return Err(XlgridError::Clipboard("permission denied".to_string()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}

// ============================================================================
// Grid builders
// ============================================================================

/// Route engine logs to the test harness; `RUST_LOG=xlgrid=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config whose column order is exactly the data columns.
pub fn bare_config() -> GridConfig {
    GridConfig {
        left_columns: Vec::new(),
        system_columns: Vec::new(),
        ..GridConfig::default()
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Records `r0..rN` with data columns `C0..Cm` valued `"{row},{col}"`.
pub fn grid_records(rows: usize, cols: usize) -> Vec<Record> {
    (0..rows)
        .map(|r| {
            (0..cols).fold(Record::new(format!("r{r}")), |rec, c| {
                rec.with_data(format!("C{c}"), format!("{r},{c}"))
            })
        })
        .collect()
}

pub fn grid_columns(cols: usize) -> Vec<String> {
    (0..cols).map(|c| format!("C{c}")).collect()
}

/// Editor over a `rows x cols` grid of data columns only.
pub fn grid_editor(rows: usize, cols: usize) -> GridEditor<RecordingSink, TestClipboard> {
    init_tracing();
    let mut editor =
        GridEditor::with_clipboard(bare_config(), RecordingSink::default(), TestClipboard::default());
    editor.set_view(grid_records(rows, cols), grid_columns(cols));
    editor
}

/// Editor over explicit records and columns, data columns only.
pub fn editor_with(
    records: Vec<Record>,
    columns: &[&str],
) -> GridEditor<RecordingSink, TestClipboard> {
    let mut editor =
        GridEditor::with_clipboard(bare_config(), RecordingSink::default(), TestClipboard::default());
    editor.set_view(records, strings(columns));
    editor
}

/// Drag-select from `from` to `to`.
pub fn drag<S: RecordSink, C: ClipboardWriter>(
    editor: &mut GridEditor<S, C>,
    from: (usize, usize),
    to: (usize, usize),
) {
    editor.begin_selection(from.0, from.1, false);
    editor.extend_selection(to.0, to.1);
    editor.end_selection();
}

/// Data map of a patch, failing if absent.
pub fn patch_data(patch: &RecordPatch) -> &BTreeMap<String, String> {
    patch.data.as_ref().expect("patch should carry data")
}
