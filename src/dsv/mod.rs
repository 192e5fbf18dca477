//! Parallel offset indexing for DSV (CSV/TSV) files.
//!
//! A file is indexed into one flat table of field offsets, after which any
//! cell is an O(1) lookup into the mapped bytes.
//!
//! # Architecture
//!
//! 1. **Map** ([`mapped`]): the file becomes a read-only byte buffer.
//! 2. **Pre-scan** ([`scanner::count_columns`]): the first record fixes the
//!    column count before any worker starts.
//! 3. **Plan** ([`parallel::plan_regions`]): the buffer is cut into one region
//!    per worker, each edge snapped to a record start by [`boundary`].
//! 4. **Scan** ([`scanner::scan_region`]): workers collect delimiter and
//!    separator offsets for their region concurrently.
//! 5. **Merge** ([`merge`]): worker outputs are concatenated in order and
//!    checked to form a rectangular table.
//!
//! Quoting is not interpreted: every delimiter byte ends a field.
//!
//! # Example
//!
//! ```
//! use dsvindex::dsv::{DsvConfig, DsvIndex};
//!
//! let tsv = b"name\tage\nann\t31\nbob\t27\n".to_vec();
//! let index = DsvIndex::from_bytes(tsv, DsvConfig::tsv().with_header(true))?;
//!
//! let ages: Vec<_> = index.get_column(1)?.map(|c| c.to_string()).collect();
//! assert_eq!(ages, ["31", "27"]);
//! # Ok::<(), dsvindex::IndexError>(())
//! ```

pub mod boundary;
mod cell;
mod column;
mod config;
pub mod estimate;
mod index;
pub mod mapped;
pub mod merge;
pub mod parallel;
mod row;
pub mod scanner;

pub use cell::Cell;
pub use column::Column;
pub use config::{DsvConfig, SMALL_FILE_THRESHOLD};
pub use estimate::estimate_total_records;
pub use index::DsvIndex;
pub use mapped::MappedFile;
pub use parallel::MAX_WORKERS;
pub use row::{Row, RowCells};
