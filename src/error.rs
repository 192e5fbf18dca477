//! Error types for index construction and lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = IndexError> = core::result::Result<T, E>;

/// Errors raised while building or querying a [`DsvIndex`](crate::DsvIndex).
#[derive(Error, Debug)]
pub enum IndexError {
    /// The source file could not be opened, inspected or mapped.
    #[error("cannot map {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scanned offsets do not describe a rectangular table.
    #[error("corrupt index: {0}")]
    CorruptIndex(#[from] Corruption),

    /// A lookup addressed a cell outside the table.
    #[error("cell ({row}, {column}) out of range for {rows} rows x {columns} columns")]
    Range {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// The configuration cannot describe a delimited file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// The worker pool could not be started.
    #[error("failed to start indexing workers")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Ways a delimited file can fail to form a rectangular offset table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Corruption {
    /// A record closed with a field count other than the first record's.
    #[error("record at byte {offset} has {found} fields, expected {expected}")]
    RaggedRecord {
        offset: usize,
        expected: usize,
        found: usize,
    },

    /// The merged boundary count is not a multiple of the column count.
    #[error("{boundaries} field boundaries do not divide into {columns} columns")]
    UnevenOffsets { boundaries: usize, columns: usize },
}

impl IndexError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IndexError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the corruption detail if this is a [`IndexError::CorruptIndex`].
    pub fn corruption(&self) -> Option<&Corruption> {
        match self {
            IndexError::CorruptIndex(c) => Some(c),
            _ => None,
        }
    }
}
