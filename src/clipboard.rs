//! Clipboard buffer and TSV transfer format.
//!
//! The buffer is the engine's own copy of the last copied cells and is what
//! paste reads from. The TSV text is only handed to the host clipboard, so a
//! denied OS clipboard never breaks copy/paste inside the grid.

use std::borrow::Cow;

use crate::error::{Result, XlgridError};

/// Row-major snapshot of copied cell values.
///
/// Rows may differ in length when the copied selection was not rectangular.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardBuffer {
    rows: Vec<Vec<String>>,
}

impl ClipboardBuffer {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when there is no value to paste.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Encode as tab-separated columns and newline-separated rows.
    ///
    /// A last row holding one empty cell is written as `""`, since a bare
    /// empty last line reads back as a trailing newline.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        let last = self.rows.len().saturating_sub(1);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if i == last && matches!(row.as_slice(), [only] if only.is_empty()) {
                out.push_str("\"\"");
                continue;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    out.push('\t');
                }
                out.push_str(&escape_cell_value(value));
            }
        }
        out
    }

    /// Decode TSV text, as produced by [`Self::to_tsv`] or another
    /// spreadsheet, into a buffer.
    ///
    /// Quoted fields may contain tabs, newlines and doubled quotes. `\r\n`
    /// line endings are accepted and one trailing newline is ignored.
    ///
    /// # Errors
    /// Returns [`XlgridError::ClipboardText`] for an unterminated quote.
    pub fn from_tsv(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut at_field_start = true;
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            if in_quotes {
                if ch == '"' {
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    current.push(ch);
                }
                continue;
            }
            match ch {
                '"' if at_field_start => {
                    in_quotes = true;
                    at_field_start = false;
                }
                '\t' => {
                    row.push(std::mem::take(&mut current));
                    at_field_start = true;
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    row.push(std::mem::take(&mut current));
                    rows.push(std::mem::take(&mut row));
                    at_field_start = true;
                }
                _ => {
                    current.push(ch);
                    at_field_start = false;
                }
            }
        }

        if in_quotes {
            return Err(XlgridError::ClipboardText(
                "unterminated quoted field".to_string(),
            ));
        }
        if !current.is_empty() || !row.is_empty() || !at_field_start {
            row.push(current);
            rows.push(row);
        }
        Ok(Self { rows })
    }
}

/// Escape a cell value for TSV.
///
/// Values containing tabs, newlines or quotes are wrapped in quotes with
/// internal quotes doubled, the way spreadsheet applications do it.
pub fn escape_cell_value(value: &str) -> Cow<'_, str> {
    let needs_quoting = value.contains(['\t', '\n', '\r', '"']);
    if needs_quoting {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Host clipboard the engine mirrors copies into.
pub trait ClipboardWriter {
    /// Write text to the host clipboard.
    ///
    /// # Errors
    /// Returns [`XlgridError::Clipboard`] when the host denies access.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// A host with no clipboard. Copies stay in the engine's buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl ClipboardWriter for NoClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

impl<W: ClipboardWriter + ?Sized> ClipboardWriter for &mut W {
    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
}

impl<W: ClipboardWriter + ?Sized> ClipboardWriter for Box<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
}
