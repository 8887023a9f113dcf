use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::{normalize, Envelope, Page};
use crate::error::ApiError;
use crate::session::TokenSource;

/// Shared HTTP plumbing for every resource client.
///
/// Owns the base URL, the connection pool and the [`TokenSource`]. All
/// signed requests go through [`HttpCore::authed`], the single place where
/// the bearer token is attached.
#[derive(Clone)]
pub struct HttpCore {
    http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
}

impl HttpCore {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token, or fail before touching the network.
    async fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, ApiError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        signed: bool,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let mut req = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        if signed {
            req = self.authed(req).await?;
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::debug!(%method, %url, status = status.as_u16(), "api error");
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        let bytes = resp.bytes().await?;
        let value = if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(format!("response body: {}", e)))?
        };
        normalize(value)
    }

    /// Signed request returning a normalized envelope.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Envelope<T>, ApiError> {
        self.dispatch(method, path, &[], body, true).await
    }

    /// Request without an Authorization header (signup / login).
    pub(crate) async fn send_anonymous<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Envelope<T>, ApiError> {
        self.dispatch(method, path, &[], body, false).await
    }

    /// Signed request whose response payload is ignored.
    pub(crate) async fn send_unit(&self, method: Method, path: &str, body: Option<Value>) -> Result<(), ApiError> {
        self.send::<Value>(method, path, body).await.map(|_| ())
    }

    /// Signed GET of a paginated list.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>, ApiError> {
        let env: Envelope<Vec<T>> = self.dispatch(Method::GET, path, query, None, true).await?;
        Ok(env.into())
    }
}

/// Serialize a request body, mapping failures to [`ApiError::Decode`].
pub(crate) fn to_body<B: serde::Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("request body: {}", e)))
}
