//! The Mutation Dispatcher.
//!
//! Clinical-record writes follow three rules the dashboard never breaks:
//!
//! 1. **Exactly one network call per operator action.** A mutation is never
//!    retried; a silently duplicated registration or SEP is worse than a
//!    loud failure.
//! 2. **Deletes demand an acknowledged confirmation.** The delete path is
//!    unreachable without a [`Confirmation`] value, and the only way to
//!    obtain one is [`Confirmation::acknowledged`].
//! 3. **No optimistic updates.** A successful mutation changes the lists
//!    only by invalidating them, which makes each affected
//!    [`ListController`] refetch from the server.

use crate::backend::{ListBackend, MutationBackend, MutationRequest};
use crate::list::ListController;
use async_trait::async_trait;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;

/// Proof that the operator acknowledged an explicit confirmation prompt.
///
/// Obtainable only through [`Confirmation::acknowledged`], which must be
/// called when, and only when, the operator has answered the prompt. There
/// is no other way to reach the network layer with a delete.
#[derive(Debug)]
pub struct Confirmation(());

impl Confirmation {
    /// Records that the operator answered the confirmation prompt.
    #[must_use]
    pub fn acknowledged() -> Self {
        Self(())
    }
}

/// The observable result of one dispatched mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server confirmed the change; affected lists were invalidated.
    Applied { message: Option<String> },
    /// The server rejected the change; carries the text to show the
    /// operator, verbatim where the server provided one.
    Rejected { message: String },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Anything that refetches itself when its resource is invalidated.
#[async_trait]
pub trait InvalidationTarget: Send + Sync {
    /// The resource collection whose mutations affect this target.
    fn resource(&self) -> &str;

    /// Refetches the target's data from the server.
    async fn refetch(&self);
}

#[async_trait]
impl<T, B> InvalidationTarget for ListController<T, B>
where
    T: Send,
    B: ListBackend<T>,
{
    fn resource(&self) -> &str {
        ListController::resource(self)
    }

    async fn refetch(&self) {
        self.refresh().await;
    }
}

/// Fan-out from confirmed mutations to the list controllers they affect.
///
/// Cheap to clone; clones share the subscription list. Subscriptions are
/// held weakly: the caller keeps the `Arc` alive for as long as the view
/// is mounted, and dropping it is the unsubscribe. Dead subscriptions are
/// pruned on the next invalidation.
#[derive(Clone, Default)]
pub struct InvalidationBus {
    targets: Arc<Mutex<Vec<Weak<dyn InvalidationTarget>>>>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target for invalidation of its resource.
    ///
    /// Only a weak reference is retained; the target stops receiving
    /// invalidations once the caller drops `target`.
    pub async fn subscribe(&self, target: &Arc<dyn InvalidationTarget>) {
        self.targets.lock().await.push(Arc::downgrade(target));
    }

    /// Refetches every live registered target whose resource matches.
    ///
    /// Each matching target refetches exactly once per invalidation.
    /// Subscriptions whose target has been dropped are removed.
    pub async fn invalidate(&self, resource: &str) {
        let targets: Vec<Arc<dyn InvalidationTarget>> = {
            let mut registered = self.targets.lock().await;
            registered.retain(|target| target.strong_count() > 0);
            registered
                .iter()
                .filter_map(Weak::upgrade)
                .filter(|target| target.resource() == resource)
                .collect()
        };

        tracing::debug!(resource, targets = targets.len(), "invalidating lists");
        for target in targets {
            target.refetch().await;
        }
    }
}

/// Dispatches single mutations and invalidates the affected lists.
pub struct MutationDispatcher<B> {
    backend: Arc<B>,
    bus: InvalidationBus,
}

impl<B> MutationDispatcher<B>
where
    B: MutationBackend,
{
    pub fn new(backend: Arc<B>, bus: InvalidationBus) -> Self {
        Self { backend, bus }
    }

    /// Creates a record.
    pub async fn create(&self, resource: &str, body: serde_json::Value) -> MutationOutcome {
        self.dispatch(MutationRequest::Create {
            resource: resource.to_owned(),
            body,
        })
        .await
    }

    /// Updates a record.
    pub async fn update(
        &self,
        resource: &str,
        id: &str,
        body: serde_json::Value,
    ) -> MutationOutcome {
        self.dispatch(MutationRequest::Update {
            resource: resource.to_owned(),
            id: id.to_owned(),
            body,
        })
        .await
    }

    /// Applies a status-only update to a record.
    pub async fn set_status(&self, resource: &str, id: &str, status: &str) -> MutationOutcome {
        self.dispatch(MutationRequest::SetStatus {
            resource: resource.to_owned(),
            id: id.to_owned(),
            status: status.to_owned(),
        })
        .await
    }

    /// Deletes a record. Unreachable without an acknowledged confirmation.
    pub async fn delete(
        &self,
        resource: &str,
        id: &str,
        _confirmed: Confirmation,
    ) -> MutationOutcome {
        self.dispatch(MutationRequest::Delete {
            resource: resource.to_owned(),
            id: id.to_owned(),
        })
        .await
    }

    async fn dispatch(&self, request: MutationRequest) -> MutationOutcome {
        let resource = request.resource().to_owned();
        tracing::debug!(resource = %resource, "dispatching mutation");

        // One call, no retries. The displayed lists are untouched until the
        // server confirms the change.
        match self.backend.execute(&request).await {
            Ok(ack) => {
                self.bus.invalidate(&resource).await;
                MutationOutcome::Applied {
                    message: ack.message,
                }
            }
            Err(error) => {
                tracing::warn!(resource = %resource, error = %error, "mutation rejected");
                MutationOutcome::Rejected {
                    message: error.user_message().to_owned(),
                }
            }
        }
    }
}
