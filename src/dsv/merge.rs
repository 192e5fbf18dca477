//! Fan-in of per-worker offset sequences.

use crate::error::{Corruption, Result};

/// The global offset table produced by [`merge`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergedOffsets {
    /// `offsets[0]` is the start of the first field; `offsets[i + 1]` is the
    /// start of field `i + 1` (one past the separator ending field `i`).
    pub offsets: Vec<usize>,
    /// Fields per record.
    pub columns: usize,
    /// Records in the table, header included.
    pub records: usize,
}

impl MergedOffsets {
    /// Number of field boundaries (`records * columns`).
    #[inline]
    pub fn boundaries(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
}

/// Concatenate worker outputs in worker order and derive the record count.
///
/// Worker regions are contiguous and ascending, so plain concatenation keeps
/// file order.
pub fn merge(parts: Vec<Vec<usize>>, columns: usize) -> Result<MergedOffsets> {
    let total: usize = parts.iter().map(Vec::len).sum();
    let mut offsets = Vec::with_capacity(total);
    for part in parts {
        offsets.extend(part);
    }
    debug_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));

    let boundaries = offsets.len().saturating_sub(1);
    let records = if columns == 0 {
        0
    } else {
        boundaries / columns
    };
    if records * columns != boundaries {
        return Err(Corruption::UnevenOffsets {
            boundaries,
            columns,
        }
        .into());
    }

    log::debug!(
        "merged {} offsets into {} records x {} columns",
        offsets.len(),
        records,
        columns
    );

    Ok(MergedOffsets {
        offsets,
        columns,
        records,
    })
}
