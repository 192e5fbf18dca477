//! Configuration for DSV indexing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndexError, Result};

/// Files smaller than this are always indexed by a single worker.
///
/// Below this size, boundary alignment and thread coordination cost more than
/// they save, and a tiny first region might not hold a whole first record.
pub const SMALL_FILE_THRESHOLD: usize = 32 * 1024;

/// Configuration for DSV indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DsvConfig {
    /// Field delimiter (default: b',')
    pub delimiter: u8,
    /// Record delimiter (default: b'\n')
    pub newline: u8,
    /// Treat the first indexed record as a header (default: false)
    pub has_header: bool,
    /// Leading records to leave out of the index entirely (default: 0)
    pub skip_rows: usize,
    /// Requested worker count, 0 for one per rayon thread (default: 0)
    pub num_threads: usize,
    /// Files below this many bytes use one worker (default: [`SMALL_FILE_THRESHOLD`])
    pub small_file_threshold: usize,
}

impl Default for DsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            newline: b'\n',
            has_header: false,
            skip_rows: 0,
            num_threads: 0,
            small_file_threshold: SMALL_FILE_THRESHOLD,
        }
    }
}

impl DsvConfig {
    /// Create a CSV configuration (comma-separated).
    pub fn csv() -> Self {
        Self::default()
    }

    /// Create a TSV configuration (tab-separated).
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }

    /// Create a PSV configuration (pipe-separated).
    pub fn psv() -> Self {
        Self {
            delimiter: b'|',
            ..Self::default()
        }
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the record delimiter.
    pub fn with_newline(mut self, newline: u8) -> Self {
        self.newline = newline;
        self
    }

    /// Set whether the first indexed record is a header.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the number of leading records to skip.
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// Set the requested worker count.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set the size below which indexing stays single-threaded.
    pub fn with_small_file_threshold(mut self, threshold: usize) -> Self {
        self.small_file_threshold = threshold;
        self
    }

    /// Check that the configuration can describe a delimited file.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.newline {
            return Err(IndexError::InvalidConfig(
                "field delimiter and record delimiter must differ",
            ));
        }
        Ok(())
    }
}
