//! HTTP plumbing shared by every entity service
//!
//! `RestClient` resolves relative resource paths against the API root,
//! attaches the bearer token, and turns responses into either a decoded
//! [`Reply`] or a [`SyncError`]. It never retries.

use crate::config::ClientConfig;
use larder_core::{SyncError, SyncResult};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;

// ============================================================================
// Reply
// ============================================================================

/// A decoded success response
#[derive(Debug, Clone)]
pub struct Reply<T> {
    pub body: T,
    pub headers: HeaderMap,
    pub status: u16,
}

// ============================================================================
// Error Body
// ============================================================================

/// JSON error body returned with non-2xx responses
///
/// Every field is optional; servers send different subsets depending on
/// which layer rejected the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub error_key: Option<String>,
    pub entity_name: Option<String>,
}

impl ErrorBody {
    /// Turn the body into a server error for `status`
    pub fn into_error(self, status: u16) -> SyncError {
        let message = self
            .message
            .or(self.detail)
            .or(self.title)
            .unwrap_or_else(|| format!("Server returned status {}", status));
        SyncError::Server {
            status,
            message,
            error_key: self.error_key,
        }
    }
}

// ============================================================================
// RestClient
// ============================================================================

/// HTTP client bound to one API root
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl RestClient {
    /// Build a client from configuration
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SyncError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url()?,
            token: config.token.clone(),
        })
    }

    /// Replace the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Drop the bearer token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// The API root
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path relative to the API root
    pub fn url(&self, path: &str) -> SyncResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SyncError::config(format!("invalid path '{}': {}", path, e)))
    }

    fn request(&self, method: Method, path: &str) -> SyncResult<RequestBuilder> {
        let mut req = self.http.request(method, self.url(path)?);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    // ========================================================================
    // Verbs
    // ========================================================================

    /// GET and decode, with optional query-string pairs
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> SyncResult<Reply<T>> {
        let mut req = self.request(Method::GET, path)?;
        if !query.is_empty() {
            req = req.query(query);
        }
        let response = send(req).await?;
        decode(response).await
    }

    /// POST a JSON body and decode the response
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SyncResult<Reply<T>> {
        let req = self.request(Method::POST, path)?.json(body);
        let response = send(req).await?;
        decode(response).await
    }

    /// PUT a JSON body and decode the response
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SyncResult<Reply<T>> {
        let req = self.request(Method::PUT, path)?.json(body);
        let response = send(req).await?;
        decode(response).await
    }

    /// DELETE; the response body is ignored
    pub async fn delete(&self, path: &str) -> SyncResult<u16> {
        let req = self.request(Method::DELETE, path)?;
        let response = send(req).await?;
        Ok(response.status().as_u16())
    }
}

// ============================================================================
// Response handling
// ============================================================================

/// Send a request; non-2xx responses become server errors
async fn send(req: RequestBuilder) -> SyncResult<Response> {
    let response = req
        .send()
        .await
        .map_err(|e| SyncError::transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status = status.as_u16();
    let body = response.bytes().await.unwrap_or_default();
    let error_body = serde_json::from_slice::<ErrorBody>(&body).unwrap_or_default();
    Err(error_body.into_error(status))
}

/// Decode a success response body as JSON
async fn decode<T: DeserializeOwned>(response: Response) -> SyncResult<Reply<T>> {
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| SyncError::transport(e.to_string()))?;
    let body = serde_json::from_slice::<T>(&bytes).map_err(|e| SyncError::Parse(e.to_string()))?;
    Ok(Reply {
        body,
        headers,
        status,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"title":"Bad Request","message":"error.idexists","errorKey":"idexists","entityName":"review"}"#,
        )
        .unwrap();
        match body.into_error(400) {
            SyncError::Server {
                status,
                message,
                error_key,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "error.idexists");
                assert_eq!(error_key.as_deref(), Some("idexists"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_body_falls_back_to_title_then_status() {
        let err = ErrorBody {
            title: Some("Internal Server Error".to_string()),
            ..ErrorBody::default()
        }
        .into_error(500);
        assert_eq!(err.user_message(), "Internal Server Error");

        let err = ErrorBody::default().into_error(502);
        assert_eq!(err.user_message(), "Server returned status 502");
    }

    #[test]
    fn test_url_resolution() {
        let client = RestClient::new(&ClientConfig::default().with_api_url("http://host:8080/app")).unwrap();
        assert_eq!(
            client.url("api/reviews/42").unwrap().as_str(),
            "http://host:8080/app/api/reviews/42"
        );
        assert_eq!(
            client.url("/api/_search/reviews").unwrap().as_str(),
            "http://host:8080/app/api/_search/reviews"
        );
    }
}
