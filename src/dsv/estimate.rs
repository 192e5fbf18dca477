//! Heuristic record-count extrapolation.
//!
//! The estimate is an approximation for progress output and allocation
//! sizing. Never use it as a row count: [`DsvIndex::rows`](super::DsvIndex::rows)
//! is the authoritative figure.

/// Headroom applied to an extrapolated record count.
pub const ESTIMATE_SLACK: f64 = 1.1;

/// Extrapolate the total number of records in a file of `file_size` bytes
/// from `records` seen within the first `bytes` bytes.
///
/// Returns `None` when the sample or the file is empty.
pub fn estimate_total_records(records: usize, bytes: usize, file_size: usize) -> Option<usize> {
    if bytes == 0 || file_size == 0 {
        return None;
    }
    let fraction = bytes as f64 / file_size as f64;
    Some((records as f64 / fraction * ESTIMATE_SLACK) as usize)
}
