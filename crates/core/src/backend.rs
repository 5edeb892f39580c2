//! The seam between controllers and transport.
//!
//! Controllers talk to the backend through two narrow traits so that the
//! interaction logic can be exercised against scripted in-memory fakes.
//! [`simrs_api::ApiClient`] implements both.

use async_trait::async_trait;
use simrs_api::{ApiClient, ApiResult, MutationAck};
use simrs_types::{ListQuery, ResourcePage, SearchTerm};

/// Read side: list pages and typeahead searches for records of type `T`.
#[async_trait]
pub trait ListBackend<T>: Send + Sync {
    /// Fetches one page of the collection at `resource`.
    async fn fetch_page(&self, resource: &str, query: &ListQuery)
        -> ApiResult<ResourcePage<T>>;

    /// Runs a typeahead search against `<resource>-search`.
    async fn search(&self, resource: &str, term: &SearchTerm) -> ApiResult<Vec<T>>;
}

/// Write side: a single create/update/delete/status change.
#[async_trait]
pub trait MutationBackend: Send + Sync {
    /// Issues the mutation exactly once. Implementations must not retry.
    async fn execute(&self, request: &MutationRequest) -> ApiResult<MutationAck>;
}

/// One user-initiated write against a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    Create {
        resource: String,
        body: serde_json::Value,
    },
    Update {
        resource: String,
        id: String,
        body: serde_json::Value,
    },
    Delete {
        resource: String,
        id: String,
    },
    SetStatus {
        resource: String,
        id: String,
        status: String,
    },
}

impl MutationRequest {
    /// The resource collection whose list contents this mutation can change.
    pub fn resource(&self) -> &str {
        match self {
            Self::Create { resource, .. }
            | Self::Update { resource, .. }
            | Self::Delete { resource, .. }
            | Self::SetStatus { resource, .. } => resource,
        }
    }

    /// Whether this request removes a record.
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

#[async_trait]
impl<T> ListBackend<T> for ApiClient
where
    T: serde::de::DeserializeOwned + Send,
{
    async fn fetch_page(
        &self,
        resource: &str,
        query: &ListQuery,
    ) -> ApiResult<ResourcePage<T>> {
        self.fetch_page_at(resource, query).await
    }

    async fn search(&self, resource: &str, term: &SearchTerm) -> ApiResult<Vec<T>> {
        self.search_at(resource, term).await
    }
}

#[async_trait]
impl MutationBackend for ApiClient {
    async fn execute(&self, request: &MutationRequest) -> ApiResult<MutationAck> {
        match request {
            MutationRequest::Create { resource, body } => self.create_at(resource, body).await,
            MutationRequest::Update { resource, id, body } => {
                self.update_at(resource, id, body).await
            }
            MutationRequest::Delete { resource, id } => self.delete_at(resource, id).await,
            MutationRequest::SetStatus {
                resource,
                id,
                status,
            } => self.set_status_at(resource, id, status).await,
        }
    }
}
