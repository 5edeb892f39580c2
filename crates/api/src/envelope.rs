//! Wire envelopes the backend wraps its payloads in.
//!
//! Every response body is `{ success, message?, data? }`. List endpoints
//! nest a Laravel-style pagination body inside `data`; search endpoints
//! carry a bare record array; mutations often carry only the flag and a
//! message. The pagination body is converted into a checked
//! [`ResourcePage`] here, so malformed metadata never escapes the
//! transport layer.

use serde::Deserialize;
use simrs_types::{PageError, PageSize, ResourcePage};

/// The outer `{ success, message, data }` envelope.
///
/// Both optional fields rely on serde's built-in handling of missing
/// `Option` fields; a `default` attribute on `data` would impose a
/// `T: Default` bound the payload types do not carry.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// The Laravel-style pagination body nested inside `data`.
#[derive(Debug, Deserialize)]
pub struct PageBody<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> PageBody<T> {
    /// Converts the body into a checked [`ResourcePage`].
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] when the reported metadata contradicts
    /// itself or uses a page size outside the allowed set.
    pub fn into_page(self) -> Result<ResourcePage<T>, PageError> {
        let page_size = PageSize::new(self.per_page)?;
        ResourcePage::from_parts(
            self.data,
            self.current_page,
            page_size,
            self.last_page,
            self.total,
        )
    }
}
