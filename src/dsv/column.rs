//! Lazy column sequences.

use core::iter::FusedIterator;
use core::ops::Range;

use super::cell::Cell;
use super::index::DsvIndex;

/// Cells of one column over a range of data rows, produced on demand.
///
/// Nothing is materialized: each step is one offset-table lookup. Clone the
/// sequence to walk it again from the same position.
#[derive(Clone, Debug)]
pub struct Column<'a> {
    index: &'a DsvIndex,
    column: usize,
    /// Remaining data rows.
    rows: Range<usize>,
}

impl<'a> Column<'a> {
    /// `rows` must already be validated against the index.
    pub(crate) fn new(index: &'a DsvIndex, column: usize, rows: Range<usize>) -> Self {
        Self {
            index,
            column,
            rows,
        }
    }

    /// Column number.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Data rows not yet yielded.
    pub fn remaining_rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    #[inline]
    fn cell(&self, row: usize) -> Cell<'a> {
        let record = row + usize::from(self.index.has_header());
        self.index.cell_at(record, self.column)
    }
}

impl<'a> Iterator for Column<'a> {
    type Item = Cell<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(self.cell(row))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let row = self.rows.nth(n)?;
        Some(self.cell(row))
    }
}

impl DoubleEndedIterator for Column<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let row = self.rows.next_back()?;
        Some(self.cell(row))
    }
}

impl ExactSizeIterator for Column<'_> {}

impl FusedIterator for Column<'_> {}
