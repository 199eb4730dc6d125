//! xlgrid - Excel-like record grid engine
//!
//! The interaction model behind an editable record table:
//! - Drag, ctrl-click and keyboard cell selection
//! - Single-cell editing routed through one column projection table
//! - Copy/paste with a TSV clipboard format, delete, and batch field updates
//! - Every multi-cell gesture reported as one batched update
//!
//! Records stay owned by the host; the engine only reports patches.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlGrid } from 'xlgrid';
//! await init();
//! const grid = new XlGrid(updateOne, updateMany, { canEdit: true });
//! grid.setView(visibleRecords, ['Owner', 'Application']);
//! grid.beginSelection(0, 6, false);
//! grid.handleKey('c', true);
//! ```

pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod filter;
pub mod projection;
pub mod store;
pub mod types;

use wasm_bindgen::prelude::*;

pub use clipboard::{ClipboardBuffer, ClipboardWriter, NoClipboard};
pub use config::GridConfig;
pub use editor::{BatchOperation, EditState, GridEditor};
#[cfg(target_arch = "wasm32")]
pub use editor::XlGrid;
pub use error::{Result, XlgridError};
pub use filter::{ColumnFilter, ColumnFilterKind, RecordFilter};
pub use store::{MemoryStore, RecordSink};
pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
