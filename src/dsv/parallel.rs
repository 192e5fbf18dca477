//! Parallel region planning and scanning.
//!
//! The file is cut into one contiguous region per worker. Inner region edges
//! are snapped forward to record starts, so no record is split between two
//! workers and none is scanned twice. Regions are scanned concurrently on a
//! dedicated rayon pool and the results come back in worker order.

use core::ops::Range;

use rayon::prelude::*;

use super::boundary::record_start_after;
use super::scanner::{scan_region, ScanParams};
use crate::error::Result;

/// Upper bound on workers for a single build, whatever was requested.
pub const MAX_WORKERS: usize = 256;

/// Number of workers to use for a file of `file_len` bytes whose first
/// indexed record is `record_len` bytes long.
///
/// `requested == 0` means one worker per rayon thread. Files smaller than
/// `threshold` always get a single worker. The result never exceeds
/// [`MAX_WORKERS`], nor the number of `record_len`-sized records the file
/// could hold, so a tiny table never spins up thousands of empty regions.
pub fn effective_threads(
    file_len: usize,
    record_len: usize,
    requested: usize,
    threshold: usize,
) -> usize {
    if file_len < threshold {
        return 1;
    }
    let threads = if requested == 0 {
        rayon::current_num_threads()
    } else {
        requested
    };
    let fillable = file_len.div_ceil(record_len.max(1));
    threads.min(fillable).min(MAX_WORKERS).max(1)
}

/// Split `text` into `threads` record-aligned regions.
///
/// The naive split divides `[0, text.len())` evenly; the first region then
/// starts at `data_start` and every inner edge moves forward to the next
/// record start. Some regions may be empty.
pub fn plan_regions(
    text: &[u8],
    data_start: usize,
    threads: usize,
    newline: u8,
) -> Vec<Range<usize>> {
    let len = text.len();
    let threads = threads.max(1);
    let span = len.div_ceil(threads);

    let mut edges = Vec::with_capacity(threads + 1);
    edges.push(data_start.min(len));
    for worker in 1..threads {
        let naive = worker * span;
        let edge = if naive >= len {
            len
        } else {
            record_start_after(text, naive, newline)
        };
        let prev = edges[edges.len() - 1];
        edges.push(edge.max(prev));
    }
    edges.push(len);

    edges.windows(2).map(|w| w[0]..w[1]).collect()
}

/// Scan `text` with `threads` workers and return one offset sequence per
/// worker, in worker order.
///
/// Fails with the first worker error; no partial result escapes.
pub fn build(
    text: &[u8],
    params: &ScanParams,
    data_start: usize,
    threads: usize,
) -> Result<Vec<Vec<usize>>> {
    let regions = plan_regions(text, data_start, threads, params.newline);

    log::debug!(
        "indexing {} bytes with {} workers, {} columns",
        text.len(),
        regions.len(),
        params.columns
    );

    if regions.len() == 1 {
        let region = regions[0].clone();
        return Ok(vec![scan_region(text, region, params, 0)?]);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(regions.len())
        .thread_name(|i| format!("dsv-index-{i}"))
        .build()?;

    pool.install(|| {
        regions
            .par_iter()
            .enumerate()
            .map(|(worker, region)| scan_region(text, region.clone(), params, worker))
            .collect::<Result<Vec<_>>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsv::scanner::count_columns;

    fn params(text: &[u8]) -> ScanParams {
        ScanParams {
            delimiter: b',',
            newline: b'\n',
            columns: count_columns(text, 0, b',', b'\n'),
            record_hint: 4,
        }
    }

    #[test]
    fn test_effective_threads() {
        assert_eq!(effective_threads(100, 10, 8, 32768), 1);
        assert_eq!(effective_threads(32767, 10, 8, 32768), 1);
        assert_eq!(effective_threads(32768, 10, 8, 32768), 8);
        assert_eq!(effective_threads(100, 10, 3, 0), 3);
        assert_eq!(
            effective_threads(1 << 20, 10, 0, 0),
            rayon::current_num_threads().clamp(1, MAX_WORKERS)
        );
    }

    #[test]
    fn test_effective_threads_clamps_absurd_requests() {
        // 1 KB of 25-byte records fills at most 41 regions
        assert_eq!(effective_threads(1024, 25, 2_000, 0), 41);
        assert_eq!(effective_threads(1024, 25, 20_000, 0), 41);
        assert_eq!(effective_threads(1 << 30, 25, 20_000, 0), MAX_WORKERS);
        // A single record, or nothing at all, is one worker
        assert_eq!(effective_threads(1024, 1024, 64, 0), 1);
        assert_eq!(effective_threads(0, 0, 64, 0), 1);
    }

    #[test]
    fn test_plan_regions_align_to_records() {
        let text = b"aa,bb\ncc,dd\nee,ff\ngg,hh\n";
        let regions = plan_regions(text, 0, 3, b'\n');

        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].start, 0);
        assert_eq!(regions[2].end, text.len());
        for pair in regions.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for region in &regions {
            if region.start > 0 && region.start < text.len() {
                assert_eq!(text[region.start - 1], b'\n');
            }
        }
    }

    #[test]
    fn test_plan_regions_huge_record() {
        // Single record with no separator: everything lands in the first region
        let text = b"aaaaaaaaaaaaaaaaaaaaaaaa,b";
        let regions = plan_regions(text, 0, 4, b'\n');

        assert_eq!(regions[0], 0..text.len());
        assert!(regions[1..].iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_plan_regions_respects_data_start() {
        let text = b"skip\nskip\na,b\nc,d\n";
        let regions = plan_regions(text, 10, 4, b'\n');

        assert_eq!(regions[0].start, 10);
        assert!(regions.iter().all(|r| r.start >= 10));
        assert_eq!(regions.last().unwrap().end, text.len());
    }

    #[test]
    fn test_build_matches_single_worker() {
        let text: Vec<u8> = (0..200)
            .flat_map(|i| format!("{i},row{i},{}\n", i * 7).into_bytes())
            .collect();
        let p = params(&text);

        let single: Vec<usize> = build(&text, &p, 0, 1).unwrap().concat();
        for threads in [2, 3, 7, 16] {
            let parts = build(&text, &p, 0, threads).unwrap();
            assert_eq!(parts.len(), threads);
            assert_eq!(parts.concat(), single, "threads={threads}");
        }
    }

    #[test]
    fn test_build_fails_on_ragged_record_in_any_worker() {
        let mut text: Vec<u8> = (0..100)
            .flat_map(|i| format!("{i},{i}\n").into_bytes())
            .collect();
        text.extend_from_slice(b"1,2,3\n");
        let p = params(&text);

        assert!(build(&text, &p, 0, 4).is_err());
    }
}
