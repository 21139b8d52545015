use std::collections::Bound;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::RangeBounds;

/// One contiguous byte slice of the resource, half-open `[start, end)`.
/// The wire format of a range request stays the inclusive `bytes=start-end`,
/// produced by [`PartRange::to_range_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRange {
    pub start: u64,
    pub end: u64,
}

impl PartRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Last byte offset covered by this range, in the inclusive form the
    /// Range header carries. Only meaningful for non-empty ranges.
    pub fn last_byte(&self) -> u64 {
        self.end.saturating_sub(1)
    }

    pub fn to_range_header(&self) -> headers::Range {
        headers::Range::bytes(self).unwrap()
    }
}

impl<'a> RangeBounds<u64> for &'a PartRange {
    fn start_bound(&self) -> Bound<&u64> {
        Bound::Included(&self.start)
    }

    fn end_bound(&self) -> Bound<&u64> {
        Bound::Excluded(&self.end)
    }
}

impl fmt::Display for PartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.last_byte())
    }
}

/// One planned slice of the download, identified by its 0-based index.
#[derive(Debug, Clone)]
pub struct PartSpec {
    pub index: usize,
    pub range: PartRange,
}

/// Splits `[0, total_size)` into exactly `part_count` contiguous ranges.
///
/// All parts are `floor(total_size / part_count)` bytes long except the last,
/// whose end is forced to `total_size` so coverage is exact regardless of the
/// division remainder. When `total_size < part_count` the non-last parts come
/// out empty; the caller routes such sizes to the fallback path and never
/// fetches them in parallel.
pub fn plan_parts(total_size: u64, part_count: NonZeroUsize) -> Vec<PartSpec> {
    let count = part_count.get();
    let part_size = total_size / count as u64;

    (0..count)
        .map(|index| {
            let start = index as u64 * part_size;
            let end = if index == count - 1 {
                total_size
            } else {
                start + part_size
            };

            PartSpec {
                index,
                range: PartRange::new(start, end),
            }
        })
        .collect()
}
