//! Reqwest-backed REST client for real mode.
//!
//! This adapter owns transport details only: URL construction, query
//! parameter encoding, HTTP error mapping, and tolerant payload extraction.
//! Typed decoding belongs to [`super::remote::RemoteCollection`].

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::domain::ServiceError;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// REST transport for one admin API base URL.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base: Url,
}

impl RestBackend {
    /// Build a backend with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn new(base: Url) -> Result<Self, ServiceError> {
        Self::with_timeout(base, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build a backend with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Network`] when the HTTP client cannot be
    /// constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ServiceError::network(error.to_string()))?;
        Ok(Self { client, base })
    }

    /// `GET <resource>` with the composed filter criteria as query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Network`], [`ServiceError::Status`], or
    /// [`ServiceError::Decode`] following the transport taxonomy.
    pub async fn get_list(
        &self,
        resource: &str,
        query_pairs: &[(String, String)],
    ) -> Result<Value, ServiceError> {
        let mut url = self.resource_url(resource, None)?;
        if !query_pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(query_pairs);
        }
        self.send(Method::GET, url, None).await
    }

    /// `POST <resource>` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Network`], [`ServiceError::Status`], or
    /// [`ServiceError::Decode`] following the transport taxonomy.
    pub async fn post(&self, resource: &str, body: &Value) -> Result<Value, ServiceError> {
        let url = self.resource_url(resource, None)?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// `PUT <resource>/:id` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Network`], [`ServiceError::Status`], or
    /// [`ServiceError::Decode`] following the transport taxonomy.
    pub async fn put(&self, resource: &str, id: &str, body: &Value) -> Result<Value, ServiceError> {
        let url = self.resource_url(resource, Some(id))?;
        self.send(Method::PUT, url, Some(body)).await
    }

    /// `DELETE <resource>/:id`, discarding any response body.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Network`] or [`ServiceError::Status`]
    /// following the transport taxonomy.
    pub async fn delete(&self, resource: &str, id: &str) -> Result<(), ServiceError> {
        let url = self.resource_url(resource, Some(id))?;
        self.send(Method::DELETE, url, None).await.map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, ServiceError> {
        debug!(%method, %url, "dispatching admin API request");
        let mut request = self.client.request(method, url);
        if let Some(payload) = body {
            request = request.json(payload);
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        let decoded: Value = serde_json::from_slice(bytes.as_ref())
            .map_err(|error| ServiceError::decode(format!("invalid JSON response: {error}")))?;
        Ok(extract_payload(decoded))
    }

    fn resource_url(&self, resource: &str, id: Option<&str>) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ServiceError::network("base URL cannot carry resource segments")
            })?;
            segments.pop_if_empty().push(resource);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

/// Unwrap the payload whether it arrives bare or nested under `data`.
///
/// Both shapes are accepted for compatibility across API revisions.
fn extract_payload(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn map_transport_error(error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::network(format!("request timed out: {error}"))
    } else {
        ServiceError::network(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ServiceError {
    let data = serde_json::from_slice(body).ok();
    ServiceError::status(status.as_u16(), data)
}
