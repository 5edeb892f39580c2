//! # SIMRS Types
//!
//! Validated value types shared by the SIMRS client crates.
//!
//! This crate contains the vocabulary of the paginated-resource contract:
//! - Page sizes restricted to the values the backend accepts
//! - List queries with "all"-sentinel filters that are omitted on the wire
//! - The Paginated Resource Page with its invariants enforced at construction
//! - Minimum-length search terms for typeahead lookups
//! - Auto-refresh intervals from the fixed set the dashboard offers
//! - Pass-through DTOs for the clinical record types the backend serves
//!
//! **No transport concerns**: HTTP, envelopes, and error taxonomy belong in
//! `simrs-api`; controller behaviour belongs in `simrs-core`.

#![warn(rust_2018_idioms)]

pub mod pagination;
pub mod query;
pub mod records;
pub mod refresh;
pub mod search;

pub use pagination::{PageError, PageSize, ResourcePage, ALLOWED_PAGE_SIZES};
pub use query::{FilterValue, ListQuery, SortDirection, SortSpec};
pub use records::{
    CpptEntry, PatientSummary, QueueEntry, RadiologyOrder, Registration, ResourceRecord, Sep,
};
pub use refresh::{AutoRefresh, RefreshInterval};
pub use search::{SearchTerm, SearchTermError, MIN_SEARCH_CHARS};
