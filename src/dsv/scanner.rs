//! Region scanning: the per-worker half of the indexing algorithm.
//!
//! A region is a byte range `[start, end)` that begins on a record start and
//! ends on a record start (or end of file). The scanner emits the offset one
//! past every delimiter and record separator in the region, so each emitted
//! offset is the start of the next field.

use core::ops::Range;

use memchr::memchr2_iter;

use super::boundary::find_record_boundary;
use super::estimate::estimate_total_records;
use crate::error::{Corruption, Result};

/// Inputs shared by every worker. Fixed before any worker starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanParams {
    /// Field delimiter.
    pub delimiter: u8,
    /// Record delimiter.
    pub newline: u8,
    /// Fields per record, from [`count_columns`].
    pub columns: usize,
    /// Length of the first record in bytes, used to size output buffers.
    pub record_hint: usize,
}

/// Count the fields of the record starting at `start`.
///
/// This is the sequential pre-scan that fixes the column count for the
/// whole file. Returns 0 if there is no data at `start`.
pub fn count_columns(text: &[u8], start: usize, delimiter: u8, newline: u8) -> usize {
    if start >= text.len() {
        return 0;
    }
    let end = find_record_boundary(text, start, newline).unwrap_or(text.len());
    1 + memchr::memchr_iter(delimiter, &text[start..end]).count()
}

/// Scan one region and return its field-boundary offsets in file order.
///
/// Worker 0 also records `region.start` as the start of the first field.
/// The region holding the end of an unterminated file closes its last field
/// at a virtual separator on `text.len()`.
pub fn scan_region(
    text: &[u8],
    region: Range<usize>,
    params: &ScanParams,
    worker: usize,
) -> Result<Vec<usize>> {
    let Range { start, end } = region;
    let mut offsets = Vec::with_capacity(initial_capacity(end.saturating_sub(start), params));

    if worker == 0 {
        offsets.push(start);
    }
    if start >= end {
        return Ok(offsets);
    }

    let mut record_start = start;
    let mut fields = 0usize;

    for pos in memchr2_iter(params.delimiter, params.newline, &text[start..end]) {
        let at = start + pos;
        offsets.push(at + 1);
        fields += 1;

        if text[at] == params.newline {
            check_record(record_start, fields, params.columns)?;
            record_start = at + 1;
            fields = 0;
        }
    }

    // Trailing record without a final separator
    if end == text.len() && record_start < end {
        offsets.push(end + 1);
        check_record(record_start, fields + 1, params.columns)?;
    }

    log::trace!(
        "worker {} scanned {}..{} ({} offsets)",
        worker,
        start,
        end,
        offsets.len()
    );

    Ok(offsets)
}

#[inline]
fn check_record(offset: usize, found: usize, expected: usize) -> Result<()> {
    if found != expected {
        return Err(Corruption::RaggedRecord {
            offset,
            expected,
            found,
        }
        .into());
    }
    Ok(())
}

/// Guess how many offsets a region of `region_len` bytes will produce.
fn initial_capacity(region_len: usize, params: &ScanParams) -> usize {
    let records = estimate_total_records(1, params.record_hint, region_len).unwrap_or(0);
    // One offset per byte is the most a region can emit
    records
        .saturating_mul(params.columns)
        .min(region_len + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(text: &[u8], delimiter: u8) -> ScanParams {
        ScanParams {
            delimiter,
            newline: b'\n',
            columns: count_columns(text, 0, delimiter, b'\n'),
            record_hint: 8,
        }
    }

    #[test]
    fn test_count_columns() {
        assert_eq!(count_columns(b"a,b,c\n1,2,3\n", 0, b',', b'\n'), 3);
        assert_eq!(count_columns(b"a,b,c\n1,2\n", 6, b',', b'\n'), 2);
        assert_eq!(count_columns(b"single", 0, b',', b'\n'), 1);
        assert_eq!(count_columns(b",,\n", 0, b',', b'\n'), 3);
        assert_eq!(count_columns(b"", 0, b',', b'\n'), 0);
    }

    #[test]
    fn test_scan_whole_file() {
        let csv = b"a,b,c\n1,2,3\n";
        let p = params(csv, b',');
        let offsets = scan_region(csv, 0..csv.len(), &p, 0).unwrap();

        assert_eq!(offsets, vec![0, 2, 4, 6, 8, 10, 12]);
    }

    #[test]
    fn test_scan_later_worker_has_no_leading_offset() {
        let csv = b"a,b\n1,2\n";
        let p = params(csv, b',');
        let offsets = scan_region(csv, 4..csv.len(), &p, 1).unwrap();

        assert_eq!(offsets, vec![6, 8]);
    }

    #[test]
    fn test_scan_flushes_unterminated_record() {
        let csv = b"a,b\n1,2";
        let p = params(csv, b',');
        let offsets = scan_region(csv, 0..csv.len(), &p, 0).unwrap();

        // Final field closed by a virtual separator at the end of the file
        assert_eq!(offsets, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_scan_empty_region() {
        let csv = b"a,b\n";
        let p = params(csv, b',');

        assert_eq!(scan_region(csv, 4..4, &p, 0).unwrap(), vec![4]);
        assert!(scan_region(csv, 4..4, &p, 3).unwrap().is_empty());
    }

    #[test]
    fn test_scan_region_without_separator() {
        // One long record with no newline at all
        let csv = b"aaaa,bbbb,cccc";
        let p = params(csv, b',');
        let offsets = scan_region(csv, 0..csv.len(), &p, 0).unwrap();

        assert_eq!(offsets, vec![0, 5, 10, 15]);
    }

    #[test]
    fn test_scan_detects_ragged_record() {
        let csv = b"a,b,c\n1,2\n";
        let p = params(csv, b',');
        let err = scan_region(csv, 0..csv.len(), &p, 0).unwrap_err();

        assert_eq!(
            err.corruption(),
            Some(&Corruption::RaggedRecord {
                offset: 6,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_scan_detects_ragged_trailing_record() {
        let csv = b"a,b\n1,2,3";
        let p = params(csv, b',');
        let err = scan_region(csv, 0..csv.len(), &p, 0).unwrap_err();

        assert!(matches!(
            err.corruption(),
            Some(Corruption::RaggedRecord { found: 3, .. })
        ));
    }

    #[test]
    fn test_quotes_are_plain_bytes() {
        let csv = b"\"a,b\",c\n";
        let p = params(csv, b',');
        let offsets = scan_region(csv, 0..csv.len(), &p, 0).unwrap();

        // The quoted comma still splits the field
        assert_eq!(p.columns, 3);
        assert_eq!(offsets, vec![0, 3, 6, 8]);
    }

    #[test]
    fn test_tsv() {
        let tsv = b"a\tb\tc\n";
        let p = params(tsv, b'\t');
        let offsets = scan_region(tsv, 0..tsv.len(), &p, 0).unwrap();

        assert_eq!(p.columns, 3);
        assert_eq!(offsets, vec![0, 2, 4, 6]);
    }
}
