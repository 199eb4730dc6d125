//! Tests for drag, ctrl-click and view-invalidation selection behaviour.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;

use common::{drag, grid_editor, grid_records, grid_columns, strings};
use test_case::test_case;
use xlgrid::{CellPosition, Selection};

fn p(row: usize, col: usize) -> CellPosition {
    CellPosition::new(row, col)
}

// ============================================================================
// Range selection
// ============================================================================

#[test]
fn test_click_selects_single_cell() {
    let mut editor = grid_editor(4, 4);
    editor.begin_selection(2, 1, false);
    assert!(editor.is_dragging());
    assert_eq!(editor.selection().cells(), vec![p(2, 1)]);
    editor.end_selection();
    assert!(!editor.is_dragging());
    assert_eq!(editor.selection().cells(), vec![p(2, 1)]);
}

#[test]
fn test_drag_to_same_cell_keeps_one_cell() {
    let mut editor = grid_editor(4, 4);
    drag(&mut editor, (1, 1), (1, 1));
    assert_eq!(editor.selection().len(), 1);
    assert!(editor.is_cell_selected(1, 1));
}

#[test]
fn test_drag_selects_inclusive_rectangle() {
    let mut editor = grid_editor(5, 5);
    drag(&mut editor, (1, 1), (3, 2));
    assert_eq!(
        editor.selection().cells(),
        vec![p(1, 1), p(1, 2), p(2, 1), p(2, 2), p(3, 1), p(3, 2)]
    );
    assert!(!editor.is_cell_selected(0, 1));
    assert!(!editor.is_cell_selected(1, 3));
}

#[test_case((0, 0), (3, 4) ; "down right")]
#[test_case((3, 4), (0, 0) ; "up left")]
#[test_case((0, 4), (3, 0) ; "down left")]
#[test_case((2, 2), (2, 2) ; "single cell")]
fn test_range_symmetry(a: (usize, usize), b: (usize, usize)) {
    let mut forward = grid_editor(5, 5);
    drag(&mut forward, a, b);
    let mut backward = grid_editor(5, 5);
    drag(&mut backward, b, a);
    assert_eq!(forward.selection().cells(), backward.selection().cells());
}

#[test]
fn test_drag_can_shrink_back() {
    let mut editor = grid_editor(5, 5);
    editor.begin_selection(0, 0, false);
    editor.extend_selection(4, 4);
    editor.extend_selection(1, 0);
    assert_eq!(editor.selection().cells(), vec![p(0, 0), p(1, 0)]);
}

#[test]
fn test_extend_without_drag_is_ignored() {
    let mut editor = grid_editor(4, 4);
    editor.extend_selection(2, 2);
    assert!(editor.selection().is_empty());

    drag(&mut editor, (0, 0), (0, 1));
    editor.extend_selection(3, 3);
    assert_eq!(editor.selection().len(), 2);
}

#[test]
fn test_end_selection_is_idempotent() {
    let mut editor = grid_editor(4, 4);
    drag(&mut editor, (0, 0), (1, 1));
    editor.end_selection();
    editor.end_selection();
    assert_eq!(editor.selection().len(), 4);
}

#[test]
fn test_new_click_replaces_selection() {
    let mut editor = grid_editor(4, 4);
    drag(&mut editor, (0, 0), (2, 2));
    editor.begin_selection(3, 3, false);
    assert_eq!(editor.selection().cells(), vec![p(3, 3)]);
}

#[test]
fn test_out_of_bounds_gestures_ignored() {
    let mut editor = grid_editor(2, 2);
    editor.begin_selection(5, 0, false);
    assert!(editor.selection().is_empty());
    editor.begin_selection(0, 0, false);
    editor.extend_selection(0, 9);
    assert_eq!(editor.selection().cells(), vec![p(0, 0)]);
}

// ============================================================================
// Ctrl-click selection
// ============================================================================

#[test]
fn test_additive_click_toggles() {
    let mut editor = grid_editor(4, 4);
    editor.begin_selection(0, 0, true);
    editor.begin_selection(2, 3, true);
    assert_eq!(editor.selection().cells(), vec![p(0, 0), p(2, 3)]);
    assert!(!editor.is_dragging());

    editor.begin_selection(0, 0, true);
    assert_eq!(editor.selection().cells(), vec![p(2, 3)]);
}

#[test]
fn test_additive_click_keeps_existing_range() {
    let mut editor = grid_editor(4, 4);
    drag(&mut editor, (0, 0), (1, 1));
    let range = editor.selection_range();

    editor.begin_selection(3, 3, true);
    assert_eq!(editor.selection().len(), 5);
    assert!(matches!(editor.selection(), Selection::Sparse(_)));
    assert_eq!(editor.selection_range(), range);

    editor.begin_selection(1, 1, true);
    assert_eq!(
        editor.selection().cells(),
        vec![p(0, 0), p(0, 1), p(1, 0), p(3, 3)]
    );
}

#[test]
fn test_plain_click_after_additive_clears() {
    let mut editor = grid_editor(4, 4);
    editor.begin_selection(0, 0, true);
    editor.begin_selection(1, 1, true);
    editor.begin_selection(3, 2, false);
    assert_eq!(editor.selection().cells(), vec![p(3, 2)]);
    assert!(matches!(editor.selection(), Selection::Rectangle(_)));
}

#[test]
fn test_read_only_grid_ignores_selection() {
    let mut editor = grid_editor(3, 3);
    editor.set_can_edit(false);
    editor.begin_selection(0, 0, false);
    editor.begin_selection(1, 1, true);
    assert!(editor.selection().is_empty());
    assert!(!editor.is_dragging());
}

#[test]
fn test_disabling_edit_stops_active_drag() {
    let mut editor = grid_editor(4, 4);
    editor.begin_selection(0, 0, false);
    editor.set_can_edit(false);
    assert!(!editor.is_dragging());

    editor.extend_selection(2, 2);
    assert_eq!(editor.selection().cells(), vec![p(0, 0)]);

    editor.set_can_edit(true);
    editor.extend_selection(2, 2);
    assert_eq!(editor.selection().len(), 1);
}

// ============================================================================
// View invalidation
// ============================================================================

#[test]
fn test_reordered_records_clear_selection_and_edit() {
    let mut editor = grid_editor(3, 2);
    drag(&mut editor, (0, 0), (1, 1));
    editor.enter_edit_mode(2, 0);
    assert!(editor.is_editing());

    let mut records = grid_records(3, 2);
    records.reverse();
    editor.set_records(records);

    assert!(editor.selection().is_empty());
    assert!(editor.selection_range().is_none());
    assert!(!editor.is_editing());
    assert!(editor.sink().calls.is_empty(), "invalidation must not commit");
}

#[test]
fn test_filtered_records_clear_selection() {
    let mut editor = grid_editor(4, 2);
    drag(&mut editor, (0, 0), (0, 1));
    let filtered: Vec<_> = grid_records(4, 2).into_iter().skip(1).collect();
    editor.set_records(filtered);
    assert!(editor.selection().is_empty());
}

#[test]
fn test_column_change_clears_selection() {
    let mut editor = grid_editor(2, 3);
    drag(&mut editor, (0, 0), (1, 2));
    editor.set_view(grid_records(2, 3), strings(&["C2", "C1", "C0"]));
    assert!(editor.selection().is_empty());
}

#[test]
fn test_refreshed_values_keep_selection() {
    let mut editor = grid_editor(2, 2);
    drag(&mut editor, (0, 0), (1, 1));
    let mut records = grid_records(2, 2);
    records[0].data.insert("C0".to_string(), "changed".to_string());
    editor.set_view(records, grid_columns(2));
    assert_eq!(editor.selection().len(), 4);
    assert_eq!(editor.cell_value(0, 0).as_deref(), Some("changed"));
}
