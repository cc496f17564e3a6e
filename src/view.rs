//! Derived views: fixed-size pages sliced from filtered collections.
//!
//! Recomputation is pull-based - callers re-derive on every render with the
//! current inputs. At tens to low hundreds of items that beats carrying an
//! incremental index. If collections grow past that, memoize on the
//! `(items, criteria)` pair instead of re-deriving unconditionally.

/// One fixed-size page sliced out of a filtered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub items: Vec<T>,
  /// 1-indexed page number this slice corresponds to
  pub page_number: usize,
  pub page_size: usize,
}

/// Slice a collection into its `page`-th window of `page_size` items.
///
/// Pages are 1-indexed and non-wrapping: page 0, a zero page size, or a page
/// past the end all produce an empty slice rather than an error.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
  if page == 0 || page_size == 0 {
    return Page {
      items: Vec::new(),
      page_number: page,
      page_size,
    };
  }

  let start = (page - 1).saturating_mul(page_size);
  let items = items
    .get(start..)
    .unwrap_or(&[])
    .iter()
    .take(page_size)
    .cloned()
    .collect();

  Page {
    items,
    page_number: page,
    page_size,
  }
}

/// Number of pages a collection of `len` items spans.
pub fn page_count(len: usize, page_size: usize) -> usize {
  if page_size == 0 {
    0
  } else {
    len.div_ceil(page_size)
  }
}
