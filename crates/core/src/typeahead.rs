//! The patient/registration lookup typeahead.
//!
//! A lookup field queries the backend as the operator types, but only once
//! the input reaches [`simrs_types::MIN_SEARCH_CHARS`] characters, and only
//! once per distinct query string. The visible result list always belongs
//! to the newest query: every request carries a sequence number, and a
//! response is applied only if no newer request has been issued since —
//! otherwise a fast typist could watch an older, wrong result set flash in
//! over the right one.
//!
//! An empty completed result is its own state ([`TypeaheadState::NotFound`]),
//! never confused with loading or failure.

use crate::backend::ListBackend;
use simrs_types::{ResourceRecord, SearchTerm};
use std::sync::Arc;
use tokio::sync::Mutex;

/// What the lookup field renders.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeaheadState<T> {
    /// No result list shown (input too short, dismissed, or selected).
    Idle,
    /// The newest query is in flight.
    Loading,
    /// The newest query completed with matches.
    Results(Vec<T>),
    /// The newest query completed with zero matches.
    NotFound,
    /// The newest query failed; carries the text to show the operator.
    Failed(String),
}

struct TypeaheadInner<T> {
    /// The trimmed input of the newest accepted keystroke.
    input: String,
    /// Sequence number of the newest issued (or invalidated) query.
    issued: u64,
    state: TypeaheadState<T>,
}

/// Controller for one lookup field.
///
/// Cheap to clone; clones share the same state and backend.
pub struct TypeaheadController<T, B> {
    resource: String,
    backend: Arc<B>,
    inner: Arc<Mutex<TypeaheadInner<T>>>,
}

impl<T, B> Clone for TypeaheadController<T, B> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            backend: Arc::clone(&self.backend),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, B> TypeaheadController<T, B>
where
    B: ListBackend<T>,
{
    /// Creates a lookup against the search endpoint of `resource`.
    pub fn new(resource: impl Into<String>, backend: Arc<B>) -> Self {
        Self {
            resource: resource.into(),
            backend,
            inner: Arc::new(Mutex::new(TypeaheadInner {
                input: String::new(),
                issued: 0,
                state: TypeaheadState::Idle,
            })),
        }
    }

    /// Creates a lookup for the record type's own resource path.
    pub fn for_record(backend: Arc<B>) -> Self
    where
        T: ResourceRecord,
    {
        Self::new(T::RESOURCE, backend)
    }

    /// The current lookup state.
    pub async fn state(&self) -> TypeaheadState<T>
    where
        T: Clone,
    {
        self.inner.lock().await.state.clone()
    }

    /// Feeds one keystroke's worth of input.
    ///
    /// Input below the minimum length closes the result list and issues no
    /// request; it also invalidates any query still in flight, so a late
    /// response cannot reopen the list. Re-entering the input already shown
    /// issues nothing.
    pub async fn input(&self, text: &str) {
        let term = match SearchTerm::new(text) {
            Ok(term) => term,
            Err(_) => {
                let mut inner = self.inner.lock().await;
                inner.input = text.trim().to_owned();
                inner.issued += 1;
                inner.state = TypeaheadState::Idle;
                return;
            }
        };

        let seq = {
            let mut inner = self.inner.lock().await;
            if inner.input == term.as_str() {
                return;
            }
            inner.input = term.as_str().to_owned();
            inner.issued += 1;
            inner.state = TypeaheadState::Loading;
            inner.issued
        };

        tracing::debug!(resource = %self.resource, query = %term, seq, "issuing typeahead search");
        let result = self.backend.search(&self.resource, &term).await;

        let mut inner = self.inner.lock().await;
        if seq != inner.issued {
            tracing::debug!(resource = %self.resource, seq, "discarding stale typeahead response");
            return;
        }

        inner.state = match result {
            Ok(items) if items.is_empty() => TypeaheadState::NotFound,
            Ok(items) => TypeaheadState::Results(items),
            Err(error) => {
                tracing::warn!(resource = %self.resource, error = %error, "typeahead search failed");
                TypeaheadState::Failed(error.user_message().to_owned())
            }
        };
    }

    /// Picks the result at `index`, closing the list.
    ///
    /// Returns the record so the caller can populate dependent form fields.
    /// Any query still in flight is invalidated.
    pub async fn select(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        let mut inner = self.inner.lock().await;
        let picked = match &inner.state {
            TypeaheadState::Results(items) => items.get(index).cloned(),
            _ => None,
        };
        if picked.is_some() {
            inner.issued += 1;
            inner.state = TypeaheadState::Idle;
        }
        picked
    }

    /// Closes the result list without selecting.
    pub async fn dismiss(&self) {
        let mut inner = self.inner.lock().await;
        inner.issued += 1;
        inner.input.clear();
        inner.state = TypeaheadState::Idle;
    }
}
