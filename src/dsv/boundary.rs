//! Record boundary location.
//!
//! Every decision about where a record starts or ends goes through this
//! module. [`next_record_boundary`] locates separators; region alignment in
//! the parallel indexer and row skipping both go through it by way of
//! [`record_start_after`].

/// Position of the first `newline` byte at or after `start`.
#[inline]
pub fn find_record_boundary(text: &[u8], start: usize, newline: u8) -> Option<usize> {
    if start >= text.len() {
        return None;
    }
    memchr::memchr(newline, &text[start..]).map(|p| start + p)
}

/// Position of the first `newline` byte at or after `start`.
///
/// Returns `start` unchanged when no separator lies ahead, meaning the
/// region extends to the end of the file.
#[inline]
pub fn next_record_boundary(text: &[u8], start: usize, newline: u8) -> usize {
    find_record_boundary(text, start, newline).unwrap_or(start)
}

/// Start of the first record following the separator found from `pos`.
///
/// Returns `text.len()` if there is no separator at or after `pos`.
#[inline]
pub fn record_start_after(text: &[u8], pos: usize, newline: u8) -> usize {
    let boundary = next_record_boundary(text, pos, newline);
    // An unchanged position is only a boundary if it holds a separator
    if text.get(boundary) == Some(&newline) {
        boundary + 1
    } else {
        text.len()
    }
}

/// Start of the record `count` records after the one beginning at `start`.
pub fn skip_records(text: &[u8], start: usize, count: usize, newline: u8) -> usize {
    let mut pos = start;
    for _ in 0..count {
        if pos >= text.len() {
            return text.len();
        }
        pos = record_start_after(text, pos, newline);
    }
    pos
}
