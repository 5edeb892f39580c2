//! The REST client.
//!
//! One method per backend verb:
//!
//! | Method         | Request                                      |
//! |----------------|----------------------------------------------|
//! | [`ApiClient::fetch_page`] | `GET /api/<resource>?page=&per_page=&…` |
//! | [`ApiClient::search`]     | `GET /api/<resource>-search?q=`         |
//! | [`ApiClient::create`]     | `POST /api/<resource>`                  |
//! | [`ApiClient::update`]     | `PUT /api/<resource>/<id>`              |
//! | [`ApiClient::delete`]     | `DELETE /api/<resource>/<id>`           |
//! | [`ApiClient::set_status`] | `PATCH /api/<resource>/<id>/status`     |
//!
//! Every method issues exactly one request. Mutations are never retried
//! here or anywhere above: a clinical record mutation that is silently
//! duplicated is worse than one that fails loudly.

use crate::config::ApiConfig;
use crate::envelope::{ApiEnvelope, PageBody};
use crate::error::{ApiError, ApiResult, GENERIC_FAILURE_MESSAGE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use simrs_types::{ListQuery, ResourcePage, ResourceRecord, SearchTerm};
use std::sync::Arc;

/// Acknowledgement of an applied mutation.
///
/// The backend may return the created/updated record; it is deliberately not
/// surfaced. Lists are only ever updated by refetching after the server
/// confirms the change, so the acknowledgement carries just the optional
/// server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationAck {
    pub message: Option<String>,
}

/// HTTP client for the SIMRS backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: Arc<ApiConfig>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Builds a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.config.base_url(), path)
    }

    /// Fetches one page of a record type's collection.
    pub async fn fetch_page<R>(&self, query: &ListQuery) -> ApiResult<ResourcePage<R>>
    where
        R: ResourceRecord + DeserializeOwned,
    {
        self.fetch_page_at(R::RESOURCE, query).await
    }

    /// Fetches one page of the collection at `resource`.
    pub async fn fetch_page_at<T>(
        &self,
        resource: &str,
        query: &ListQuery,
    ) -> ApiResult<ResourcePage<T>>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(resource, page = query.page(), "fetching list page");
        let response = self
            .http
            .get(self.endpoint(resource))
            .query(&query.query_params())
            .send()
            .await?;

        let body: PageBody<T> = decode_data(response).await?;
        body.into_page()
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Runs a typeahead search against a record type's search endpoint.
    ///
    /// An empty result list is a valid outcome, not an error.
    pub async fn search<R>(&self, term: &SearchTerm) -> ApiResult<Vec<R>>
    where
        R: ResourceRecord + DeserializeOwned,
    {
        self.search_at(R::RESOURCE, term).await
    }

    /// Runs a typeahead search against `<resource>-search`.
    pub async fn search_at<T>(&self, resource: &str, term: &SearchTerm) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(resource, query = term.as_str(), "searching");
        let response = self
            .http
            .get(self.endpoint(&format!("{resource}-search")))
            .query(&[("q", term.as_str())])
            .send()
            .await?;

        decode_data(response).await
    }

    /// Creates a record.
    pub async fn create<R, B>(&self, body: &B) -> ApiResult<MutationAck>
    where
        R: ResourceRecord,
        B: Serialize + Sync + ?Sized,
    {
        self.create_at(R::RESOURCE, body).await
    }

    /// Creates a record in the collection at `resource`.
    pub async fn create_at<B>(&self, resource: &str, body: &B) -> ApiResult<MutationAck>
    where
        B: Serialize + Sync + ?Sized,
    {
        tracing::debug!(resource, "creating record");
        let response = self
            .http
            .post(self.endpoint(resource))
            .json(body)
            .send()
            .await?;
        decode_ack(response).await
    }

    /// Updates a record.
    pub async fn update<R, B>(&self, id: &str, body: &B) -> ApiResult<MutationAck>
    where
        R: ResourceRecord,
        B: Serialize + Sync + ?Sized,
    {
        self.update_at(R::RESOURCE, id, body).await
    }

    /// Updates the record `id` in the collection at `resource`.
    pub async fn update_at<B>(&self, resource: &str, id: &str, body: &B) -> ApiResult<MutationAck>
    where
        B: Serialize + Sync + ?Sized,
    {
        tracing::debug!(resource, id, "updating record");
        let response = self
            .http
            .put(self.endpoint(&format!("{resource}/{id}")))
            .json(body)
            .send()
            .await?;
        decode_ack(response).await
    }

    /// Deletes a record.
    pub async fn delete<R>(&self, id: &str) -> ApiResult<MutationAck>
    where
        R: ResourceRecord,
    {
        self.delete_at(R::RESOURCE, id).await
    }

    /// Deletes the record `id` from the collection at `resource`.
    pub async fn delete_at(&self, resource: &str, id: &str) -> ApiResult<MutationAck> {
        tracing::debug!(resource, id, "deleting record");
        let response = self
            .http
            .delete(self.endpoint(&format!("{resource}/{id}")))
            .send()
            .await?;
        decode_ack(response).await
    }

    /// Applies a status-only update to a record.
    pub async fn set_status<R>(&self, id: &str, status: &str) -> ApiResult<MutationAck>
    where
        R: ResourceRecord,
    {
        self.set_status_at(R::RESOURCE, id, status).await
    }

    /// Applies a status-only update via `PATCH <resource>/<id>/status`.
    pub async fn set_status_at(
        &self,
        resource: &str,
        id: &str,
        status: &str,
    ) -> ApiResult<MutationAck> {
        tracing::debug!(resource, id, status, "updating record status");
        let response = self
            .http
            .patch(self.endpoint(&format!("{resource}/{id}/status")))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        decode_ack(response).await
    }
}

/// Error bodies carry an optional human-readable `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Triages the HTTP status and returns the body text of a 2xx response.
async fn triage(response: reqwest::Response) -> ApiResult<(StatusCode, String)> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_server_error() {
        tracing::warn!(status = status.as_u16(), "server failure");
        return Err(ApiError::Server {
            status: status.as_u16(),
        });
    }
    if status.is_client_error() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());
        return Err(ApiError::Validation {
            status: status.as_u16(),
            message,
        });
    }

    Ok((status, text))
}

/// Decodes a 2xx enveloped response and extracts its `data` payload.
async fn decode_data<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let (status, text) = triage(response).await?;
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))?;

    if !envelope.success {
        return Err(ApiError::Validation {
            status: status.as_u16(),
            message: envelope
                .message
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned()),
        });
    }

    envelope
        .data
        .ok_or_else(|| ApiError::Malformed("success envelope without data".to_owned()))
}

/// Decodes a mutation response into an acknowledgement.
///
/// Mutation endpoints are less uniform than list endpoints: some return the
/// envelope, some return the created record bare. Any 2xx JSON body that is
/// not a `success: false` envelope counts as applied.
async fn decode_ack(response: reqwest::Response) -> ApiResult<MutationAck> {
    let (status, text) = triage(response).await?;

    if text.trim().is_empty() {
        return Ok(MutationAck { message: None });
    }

    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| ApiError::Malformed(e.to_string()))?;

    match value.get("success").and_then(serde_json::Value::as_bool) {
        Some(true) | None => Ok(MutationAck {
            message: value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
        }),
        Some(false) => Err(ApiError::Validation {
            status: status.as_u16(),
            message: value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned(), str::to_owned),
        }),
    }
}
