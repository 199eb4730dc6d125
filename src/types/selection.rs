use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A `(row, col)` address into the visible grid.
///
/// Ordering is row-major, so sorted collections of positions iterate in
/// reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Anchor/drag pair of a range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: CellPosition,
    pub end: CellPosition,
}

impl SelectionRange {
    /// A one-cell range anchored at `pos`.
    pub const fn at(pos: CellPosition) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Normalized `(min_row, min_col, max_row, max_col)`.
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.start.row.min(self.end.row),
            self.start.col.min(self.end.col),
            self.start.row.max(self.end.row),
            self.start.col.max(self.end.col),
        )
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        (min_row..=max_row).contains(&pos.row) && (min_col..=max_col).contains(&pos.col)
    }

    /// Number of cells in the rectangle.
    pub fn len(&self) -> usize {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        (max_row - min_row + 1).saturating_mul(max_col - min_col + 1)
    }

    /// Every cell of the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellPosition> {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        (min_row..=max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| CellPosition::new(row, col)))
    }
}

/// The set of highlighted cells.
///
/// A drag produces a `Rectangle`; ctrl-click toggling produces an arbitrary
/// `Sparse` set. The rectangle is kept symbolic so extending a drag costs
/// the same regardless of its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Rectangle(SelectionRange),
    Sparse(BTreeSet<CellPosition>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Sparse(BTreeSet::new())
    }
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Rectangle(_) => false,
            Self::Sparse(cells) => cells.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Rectangle(range) => range.len(),
            Self::Sparse(cells) => cells.len(),
        }
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        match self {
            Self::Rectangle(range) => range.contains(pos),
            Self::Sparse(cells) => cells.contains(&pos),
        }
    }

    /// All selected cells in row-major order.
    pub fn cells(&self) -> Vec<CellPosition> {
        match self {
            Self::Rectangle(range) => range.cells().collect(),
            Self::Sparse(cells) => cells.iter().copied().collect(),
        }
    }

    /// Selected columns bucketed by row, both ascending.
    ///
    /// Sparse selections yield ragged rows: each row lists only the columns
    /// selected in that row.
    pub fn rows(&self) -> BTreeMap<usize, Vec<usize>> {
        let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for pos in self.cells() {
            rows.entry(pos.row).or_default().push(pos.col);
        }
        rows
    }

    /// Minimum row and minimum column of the selection.
    pub fn top_left(&self) -> Option<CellPosition> {
        match self {
            Self::Rectangle(range) => {
                let (min_row, min_col, _, _) = range.bounds();
                Some(CellPosition::new(min_row, min_col))
            }
            Self::Sparse(cells) => {
                let row = cells.iter().map(|p| p.row).min()?;
                let col = cells.iter().map(|p| p.col).min()?;
                Some(CellPosition::new(row, col))
            }
        }
    }

    /// Flip membership of one cell. A rectangle is materialized first.
    pub fn toggle(&mut self, pos: CellPosition) {
        if let Self::Rectangle(range) = self {
            *self = Self::Sparse(range.cells().collect());
        }
        if let Self::Sparse(cells) = self {
            if !cells.remove(&pos) {
                cells.insert(pos);
            }
        }
    }
}
