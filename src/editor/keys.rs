//! Keyboard shortcuts.

use super::GridEditor;
use crate::clipboard::ClipboardWriter;
use crate::store::RecordSink;

impl<S: RecordSink, C: ClipboardWriter> GridEditor<S, C> {
    /// Dispatch a key press. `ctrl` is true when Ctrl or Cmd is held.
    ///
    /// Copy, paste and Delete need a selected cell. Enter and Escape act on
    /// an open edit whether or not anything is selected. Returns `true` when
    /// the key was handled and the host should suppress its default action.
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> bool {
        let has_selection = !self.selection.is_empty();
        match key {
            "c" | "C" if ctrl && has_selection => {
                self.copy_selection();
                true
            }
            "v" | "V" if ctrl && has_selection => {
                self.paste_at_selection();
                true
            }
            "Delete" if has_selection => {
                self.delete_selection();
                true
            }
            "Enter" if self.editing.is_some() => {
                self.commit_edit();
                true
            }
            "Escape" if has_selection || self.editing.is_some() => {
                self.cancel_edit();
                self.clear_selection();
                true
            }
            _ => false,
        }
    }
}
