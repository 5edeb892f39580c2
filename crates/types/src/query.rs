//! List query state and its wire rendering.
//!
//! A [`ListQuery`] captures everything a list view lets the operator adjust:
//! page, page size, free-text search, per-column filters, and sort order.
//! The same query always renders to the same ordered parameter list, so two
//! equal queries describe the same request.
//!
//! Filters carry an explicit "all" sentinel: the dashboard's filter dropdowns
//! offer an "all" entry, and selecting it is request-equivalent to having no
//! filter at all. The sentinel is therefore omitted entirely when the query
//! is rendered.

use crate::pagination::{PageError, PageSize};
use std::collections::BTreeMap;

/// A single filter selection: either the "all" sentinel or a concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// No narrowing; omitted from the request entirely.
    All,
    /// Narrow to records matching this value.
    Value(String),
}

impl FilterValue {
    /// Convenience constructor for a concrete filter value.
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    /// Whether this selection is the "all" sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Sort direction for a sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The wire form of the direction.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A sort selection: column name plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// The full user-adjustable state of one list view.
///
/// Narrowing inputs (search, filters, page size) reset the page back to 1:
/// keeping the old page index after the result set shrinks could leave the
/// query pointing beyond the last page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    page: u32,
    page_size: PageSize,
    search: Option<String>,
    filters: BTreeMap<String, FilterValue>,
    sort: Option<SortSpec>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQuery {
    /// A fresh query: page 1, default page size, no narrowing.
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            search: None,
            filters: BTreeMap::new(),
            sort: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Returns the filter selection for `key`, if one has been made.
    pub fn filter(&self, key: &str) -> Option<&FilterValue> {
        self.filters.get(key)
    }

    /// Navigates to a page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::ZeroPage`] for page 0; pages are 1-indexed.
    pub fn set_page(&mut self, page: u32) -> Result<(), PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        self.page = page;
        Ok(())
    }

    /// Changes the page size and resets to page 1.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Sets the free-text search and resets to page 1.
    ///
    /// A blank string clears the search, making it request-equivalent to
    /// never having searched.
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        };
        self.page = 1;
    }

    /// Clears the free-text search and resets to page 1.
    pub fn clear_search(&mut self) {
        self.search = None;
        self.page = 1;
    }

    /// Sets a filter selection and resets to page 1.
    ///
    /// Storing [`FilterValue::All`] is allowed; it simply never reaches the
    /// wire.
    pub fn set_filter(&mut self, key: impl Into<String>, value: FilterValue) {
        self.filters.insert(key.into(), value);
        self.page = 1;
    }

    /// Removes a filter selection and resets to page 1.
    pub fn clear_filter(&mut self, key: &str) {
        self.filters.remove(key);
        self.page = 1;
    }

    /// Sets or clears the sort selection.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Renders the query as ordered wire parameters.
    ///
    /// The rendering is deterministic: pagination first, then search, then
    /// filters in key order, then sort. "All" filter selections and blank
    /// searches are omitted, so "no filter" and "filter = all" produce
    /// identical requests.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_owned(), self.page.to_string()),
            ("per_page".to_owned(), self.page_size.to_string()),
        ];

        if let Some(search) = &self.search {
            params.push(("search".to_owned(), search.clone()));
        }

        for (key, value) in &self.filters {
            if let FilterValue::Value(value) = value {
                params.push((key.clone(), value.clone()));
            }
        }

        if let Some(sort) = &self.sort {
            params.push(("sort_by".to_owned(), sort.column.clone()));
            params.push(("sort_dir".to_owned(), sort.direction.as_param().to_owned()));
        }

        params
    }
}
