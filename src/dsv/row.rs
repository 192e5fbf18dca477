//! Record-oriented views.

use core::iter::FusedIterator;
use core::ops::Range;

use super::cell::Cell;
use super::index::DsvIndex;

/// A single record of an indexed file.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    index: &'a DsvIndex,
    /// Absolute record number, header included.
    record: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(index: &'a DsvIndex, record: usize) -> Self {
        Self { index, record }
    }

    /// Get field at column index (0-indexed).
    pub fn get(&self, column: usize) -> Option<Cell<'a>> {
        (column < self.index.columns()).then(|| self.index.cell_at(self.record, column))
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.index.columns()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over fields in this row.
    pub fn cells(&self) -> RowCells<'a> {
        RowCells {
            row: *self,
            columns: 0..self.index.columns(),
        }
    }
}

/// Iterator over the cells of a [`Row`].
#[derive(Clone, Debug)]
pub struct RowCells<'a> {
    row: Row<'a>,
    columns: Range<usize>,
}

impl<'a> Iterator for RowCells<'a> {
    type Item = Cell<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let column = self.columns.next()?;
        Some(self.row.index.cell_at(self.row.record, column))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.columns.size_hint()
    }
}

impl ExactSizeIterator for RowCells<'_> {}

impl FusedIterator for RowCells<'_> {}
