//! Offset pagination over an in-memory, already-filtered list.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Page size used by the post browser when nothing is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(6) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of pages needed for `len` items; never less than one.
pub fn page_count(len: usize, size: NonZeroUsize) -> usize {
    len.div_ceil(size.get()).max(1)
}

/// Clamp a 1-based page request into `[1, page_count]`.
pub fn clamp_page(requested: usize, len: usize, size: NonZeroUsize) -> usize {
    requested.clamp(1, page_count(len, size))
}

/// Index range of the 1-based `page`, after clamping.
pub fn page_bounds(page: usize, len: usize, size: NonZeroUsize) -> Range<usize> {
    let page = clamp_page(page, len, size);
    let start = (page - 1) * size.get();
    let end = (start + size.get()).min(len);
    start.min(len)..end
}
