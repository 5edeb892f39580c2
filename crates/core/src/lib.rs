//! # SIMRS Core
//!
//! The interaction contract between the dashboard's list views and the REST
//! backend, extracted from the pattern every page repeats:
//!
//! - [`ListController`] — holds one list view's query state, fetches pages,
//!   keeps the previous page visible while a fetch is in flight, discards
//!   stale responses, and optionally polls on a timer without ever doubling
//!   up on an in-flight fetch.
//! - [`MutationDispatcher`] — one network call per operator action, never
//!   retried; deletes are gated on an explicit [`Confirmation`]; success
//!   invalidates the affected lists so they refetch.
//! - [`TypeaheadController`] — minimum-length lookup with
//!   most-recent-query-wins semantics and a "not found" state distinct from
//!   loading.
//! - [`print`] — pure record-to-HTML formatting for queue slips and SEP
//!   forms.
//!
//! Controllers never mutate fetched data in place: a page is replaced
//! wholesale by the next successful fetch, and a failed mutation leaves the
//! displayed list untouched.

#![warn(rust_2018_idioms)]

pub mod backend;
pub mod form;
pub mod list;
pub mod mutation;
pub mod print;
pub mod query_key;
pub mod typeahead;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{ListBackend, MutationBackend, MutationRequest};
pub use form::FormSession;
pub use list::{FetchStatus, ListController, ListSnapshot};
pub use mutation::{Confirmation, InvalidationBus, InvalidationTarget, MutationDispatcher, MutationOutcome};
pub use query_key::QueryKey;
pub use typeahead::{TypeaheadController, TypeaheadState};
