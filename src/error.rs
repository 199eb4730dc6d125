//! Structured error types for xlgrid.
//!
//! Grid gestures (selection, copy, paste, delete) never fail; they degrade to
//! no-ops. These errors cover the boundaries that can: decoding host input,
//! talking to the host clipboard and looking records up in a store.

/// All errors that can occur at xlgrid's boundaries.
#[derive(Debug, thiserror::Error)]
pub enum XlgridError {
    /// JSON decoding of configuration, records or patches.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Unknown batch operation name.
    #[error("Unknown batch operation: {0}")]
    BatchOperation(String),

    /// Clipboard text that cannot be decoded into rows of cells.
    #[error("Malformed clipboard text: {0}")]
    ClipboardText(String),

    /// The host clipboard refused or is unavailable.
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// A patch targeted a record id the store does not hold.
    #[error("Unknown record: {0}")]
    UnknownRecord(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlgridError>;

#[cfg(target_arch = "wasm32")]
impl From<XlgridError> for wasm_bindgen::JsValue {
    fn from(e: XlgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
