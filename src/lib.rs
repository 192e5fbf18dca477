//! # dsvindex
//!
//! Parallel offset indexing of delimited text files.
//!
//! A CSV/TSV file is memory-mapped, split into record-aligned regions, and
//! scanned by a pool of workers. The per-worker offsets are merged into one
//! ordered table so that any cell can be read in O(1) without re-scanning.
//!
//! ## Module Organization
//!
//! - [`dsv`] - Mapping, region planning, scanning, merging and lookup
//! - [`error`] - Error types shared by construction and lookup
//!
//! ## Quick Start
//!
//! ```
//! use dsvindex::{DsvConfig, DsvIndex};
//!
//! let csv = b"a,b,c\n1,2,3\n4,5,6\n".to_vec();
//! let index = DsvIndex::from_bytes(csv, DsvConfig::csv())?;
//!
//! assert_eq!(index.rows(), 3);
//! assert_eq!(index.columns(), 3);
//! assert_eq!(index.get(0, 0)?, "a");
//! # Ok::<(), dsvindex::IndexError>(())
//! ```
//!
//! Files are opened with [`DsvIndex::open`]. Cells borrow from the index, so
//! the mapping cannot be released while a cell is alive.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization of [`DsvConfig`]
//! - `cli` - Build the `dsvindex` command-line tool

/// High-performance DSV (CSV/TSV) offset indexing.
pub mod dsv;

/// Error types.
pub mod error;

// DSV types
pub use dsv::{Cell, Column, DsvConfig, DsvIndex, MappedFile, Row};
pub use error::{Corruption, IndexError, Result};
