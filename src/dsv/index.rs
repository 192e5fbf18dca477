//! Random-access offset index over a delimited file.

use core::ops::Range;
use std::path::Path;

use super::boundary::{find_record_boundary, skip_records};
use super::cell::Cell;
use super::column::Column;
use super::config::DsvConfig;
use super::mapped::MappedFile;
use super::merge::{merge, MergedOffsets};
use super::parallel::{self, effective_threads};
use super::row::Row;
use super::scanner::{count_columns, ScanParams};
use crate::error::{IndexError, Result};

/// Flat offset index enabling O(1) access to any cell of a delimited file.
///
/// The index owns the mapped file and one ordered table of field offsets.
/// It is built once, synchronously, and is immutable afterwards; lookups are
/// read-only and can run from many threads at once.
///
/// # Example
///
/// ```
/// use dsvindex::{DsvConfig, DsvIndex};
///
/// let csv = b"a,b,c\n1,2,3\n4,5,6\n".to_vec();
/// let index = DsvIndex::from_bytes(csv, DsvConfig::csv().with_header(true))?;
///
/// assert_eq!(index.columns(), 3);
/// assert_eq!(index.rows(), 2);
/// assert_eq!(index.get(0, 0)?, "1");
/// assert_eq!(index.get(1, 2)?, "6");
/// # Ok::<(), dsvindex::IndexError>(())
/// ```
#[derive(Debug)]
pub struct DsvIndex {
    source: MappedFile,
    offsets: Vec<usize>,
    columns: usize,
    records: usize,
    workers: usize,
    config: DsvConfig,
}

impl DsvIndex {
    /// Map `path` and index it.
    pub fn open(path: impl AsRef<Path>, config: DsvConfig) -> Result<Self> {
        config.validate()?;
        let source = MappedFile::open(path)?;
        Self::build(source, config)
    }

    /// Index bytes that are already in memory.
    pub fn from_bytes(bytes: Vec<u8>, config: DsvConfig) -> Result<Self> {
        config.validate()?;
        Self::build(MappedFile::from_bytes(bytes), config)
    }

    fn build(source: MappedFile, config: DsvConfig) -> Result<Self> {
        let text = source.as_bytes();
        let data_start = skip_records(text, 0, config.skip_rows, config.newline);

        let columns = count_columns(text, data_start, config.delimiter, config.newline);
        let record_end = find_record_boundary(text, data_start, config.newline)
            .map_or(text.len(), |p| p + 1);
        let params = ScanParams {
            delimiter: config.delimiter,
            newline: config.newline,
            columns,
            record_hint: record_end - data_start,
        };

        let workers = effective_threads(
            text.len(),
            params.record_hint,
            config.num_threads,
            config.small_file_threshold,
        );
        let parts = parallel::build(text, &params, data_start, workers)?;
        let MergedOffsets {
            offsets,
            columns,
            records,
        } = merge(parts, columns)?;

        Ok(Self {
            source,
            offsets,
            columns,
            records,
            workers,
            config,
        })
    }

    /// Number of data rows (the header is not counted).
    #[inline]
    pub fn rows(&self) -> usize {
        self.records.saturating_sub(self.header_rows())
    }

    /// Alias of [`rows`](Self::rows) for column consumers.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows()
    }

    /// Number of fields per record.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether the first indexed record is treated as a header.
    #[inline]
    pub fn has_header(&self) -> bool {
        self.config.has_header
    }

    /// Number of workers the index was built with.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The configuration the index was built with.
    pub fn config(&self) -> &DsvConfig {
        &self.config
    }

    /// The underlying byte buffer.
    pub fn source(&self) -> &MappedFile {
        &self.source
    }

    /// The raw offset table (see [`MergedOffsets::offsets`]).
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Cell at data row `row`, column `col`.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell<'_>> {
        if row >= self.rows() || col >= self.columns {
            return Err(self.range_error(row, col));
        }
        Ok(self.cell_at(row + self.header_rows(), col))
    }

    /// Lazy sequence of every cell in column `col`.
    pub fn get_column(&self, col: usize) -> Result<Column<'_>> {
        self.get_column_range(col, 0..self.rows())
    }

    /// Lazy sequence of column `col` over data rows `rows`.
    pub fn get_column_range(&self, col: usize, rows: Range<usize>) -> Result<Column<'_>> {
        if col >= self.columns {
            return Err(self.range_error(rows.start, col));
        }
        if rows.start > rows.end || rows.end > self.rows() {
            return Err(self.range_error(rows.end, col));
        }
        Ok(Column::new(self, col, rows))
    }

    /// Data row `row`.
    pub fn row(&self, row: usize) -> Result<Row<'_>> {
        if row >= self.rows() {
            return Err(self.range_error(row, 0));
        }
        Ok(Row::new(self, row + self.header_rows()))
    }

    /// The header record, if the index has one.
    pub fn header(&self) -> Option<Row<'_>> {
        (self.has_header() && self.records > 0).then(|| Row::new(self, 0))
    }

    #[inline]
    fn header_rows(&self) -> usize {
        usize::from(self.config.has_header)
    }

    /// Cell at absolute record `record` (header included). Callers check bounds.
    #[inline]
    pub(crate) fn cell_at(&self, record: usize, col: usize) -> Cell<'_> {
        let i = record * self.columns + col;
        let start = self.offsets[i];
        let end = self.offsets[i + 1] - 1;
        Cell::new(self.source.slice(start, end))
    }

    fn range_error(&self, row: usize, column: usize) -> IndexError {
        IndexError::Range {
            row,
            column,
            rows: self.rows(),
            columns: self.columns,
        }
    }
}
