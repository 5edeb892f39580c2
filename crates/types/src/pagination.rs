//! Pagination value types.
//!
//! The backend serves list data one page at a time. A page is a transient
//! projection: it is replaced wholesale on every successful fetch and never
//! merged or patched in place. The invariants the backend promises for a page
//! are checked here, at construction, so that no other crate can hold a
//! malformed page.

use serde::Serialize;

/// Page sizes the dashboard offers and the backend accepts.
pub const ALLOWED_PAGE_SIZES: [u32; 7] = [5, 10, 20, 25, 30, 40, 50];

/// Errors that can occur when constructing pagination types.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The requested page size is not one of [`ALLOWED_PAGE_SIZES`].
    #[error("page size {0} is not one of the allowed values")]
    DisallowedPageSize(u32),
    /// Page numbers are 1-indexed; zero is never a valid page.
    #[error("page numbers are 1-indexed; page 0 is not valid")]
    ZeroPage,
    /// The current page lies beyond the reported last page.
    #[error("page {page} exceeds the last page {total_pages}")]
    PageOutOfRange { page: u32, total_pages: u32 },
    /// The server returned more items than the requested page size.
    #[error("received {count} items for a page size of {page_size}")]
    Overfull { count: usize, page_size: u32 },
}

/// A page size restricted to the fixed set the backend accepts.
///
/// Construction fails for any value outside [`ALLOWED_PAGE_SIZES`], so a
/// `PageSize` in hand is always a size the backend will honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u32")]
pub struct PageSize(u32);

impl PageSize {
    /// Creates a page size from one of the allowed values.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::DisallowedPageSize`] for any other value.
    pub fn new(value: u32) -> Result<Self, PageError> {
        if ALLOWED_PAGE_SIZES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(PageError::DisallowedPageSize(value))
        }
    }

    /// Returns the size as a plain integer.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    /// The dashboard's default page size.
    fn default() -> Self {
        Self(10)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One server-computed page of records plus its pagination metadata.
///
/// Invariants, checked by [`ResourcePage::from_parts`]:
/// - `items.len() <= page_size`
/// - `page >= 1`, and `page <= total_pages` whenever `total_items > 0`
///
/// The record order is defined by the server and preserved as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePage<T> {
    items: Vec<T>,
    page: u32,
    page_size: PageSize,
    total_pages: u32,
    total_items: u64,
}

impl<T> ResourcePage<T> {
    /// Assembles a page from server-reported parts, checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when the parts contradict each other: an
    /// overfull item list, a zero page number, or a page beyond the last
    /// page of a non-empty result set.
    pub fn from_parts(
        items: Vec<T>,
        page: u32,
        page_size: PageSize,
        total_pages: u32,
        total_items: u64,
    ) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        if items.len() > page_size.get() as usize {
            return Err(PageError::Overfull {
                count: items.len(),
                page_size: page_size.get(),
            });
        }
        if total_items > 0 && page > total_pages {
            return Err(PageError::PageOutOfRange { page, total_pages });
        }

        Ok(Self {
            items,
            page,
            page_size,
            total_pages,
            total_items,
        })
    }

    /// The records on this page, in server order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The 1-indexed page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The page size that was requested.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// The server-computed number of pages.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// The server-computed record count across all pages.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Whether this page carries no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_page_sizes_construct() {
        for size in ALLOWED_PAGE_SIZES {
            assert_eq!(PageSize::new(size).unwrap().get(), size);
        }
    }

    #[test]
    fn disallowed_page_size_is_rejected() {
        assert!(matches!(
            PageSize::new(7),
            Err(PageError::DisallowedPageSize(7))
        ));
        assert!(matches!(
            PageSize::new(0),
            Err(PageError::DisallowedPageSize(0))
        ));
    }

    #[test]
    fn default_page_size_is_ten() {
        assert_eq!(PageSize::default().get(), 10);
    }

    #[test]
    fn page_within_size_constructs() {
        let size = PageSize::new(10).unwrap();
        let page = ResourcePage::from_parts(vec!["a", "b", "c"], 1, size, 1, 3).unwrap();
        assert_eq!(page.items(), &["a", "b", "c"]);
        assert_eq!(page.page(), 1);
        assert_eq!(page.total_items(), 3);
    }

    #[test]
    fn overfull_page_is_rejected() {
        let size = PageSize::new(5).unwrap();
        let items = vec![0u8; 6];
        assert!(matches!(
            ResourcePage::from_parts(items, 1, size, 1, 6),
            Err(PageError::Overfull { count: 6, .. })
        ));
    }

    #[test]
    fn zero_page_is_rejected() {
        let size = PageSize::default();
        assert!(matches!(
            ResourcePage::from_parts(Vec::<u8>::new(), 0, size, 1, 0),
            Err(PageError::ZeroPage)
        ));
    }

    #[test]
    fn page_beyond_last_is_rejected_for_non_empty_results() {
        let size = PageSize::default();
        assert!(matches!(
            ResourcePage::from_parts(Vec::<u8>::new(), 3, size, 2, 15),
            Err(PageError::PageOutOfRange {
                page: 3,
                total_pages: 2
            })
        ));
    }

    #[test]
    fn empty_result_set_allows_page_one() {
        let size = PageSize::default();
        let page = ResourcePage::from_parts(Vec::<u8>::new(), 1, size, 0, 0).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
    }
}
