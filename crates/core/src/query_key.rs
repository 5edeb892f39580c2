//! Canonical identity of a list query.
//!
//! The cached page for a list view is owned by exactly one query identity:
//! resource plus the rendered request parameters. Because "all"-sentinel
//! filters and blank searches never render, a query with `status = all` and
//! one with no status filter share the same key, and therefore the same
//! cache slot and single-flight guard.

use simrs_types::ListQuery;

/// The identity of one list request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: Vec<(String, String)>,
}

impl QueryKey {
    /// Derives the key for a query against `resource`.
    pub fn new(resource: &str, query: &ListQuery) -> Self {
        Self {
            resource: resource.to_owned(),
            params: query.query_params(),
        }
    }

    /// The resource collection this key belongs to.
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}?", self.resource)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
