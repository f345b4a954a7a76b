//! REST client for the tracker backend.
//!
//! One method per endpoint. Every call returns `Result<_, ApiError>` and
//! nothing is retried: the caller decides what a failure means.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ApiError;
use crate::session::Session;

mod applications;
mod auth;
mod contacts;
mod insights;
mod source;

pub use source::SessionSource;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.api_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.api_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.api_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // the backend also hands out a session cookie on login
            .cookie_store(true)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Binds a session (or none) so the client can serve as a `TrackerSource`.
    pub fn source<'a>(&'a self, session: Option<&'a Session>) -> SessionSource<'a> {
        SessionSource::new(self, session)
    }

    /// Joins path segments onto the base URL. Each segment is percent-encoded
    /// on its own, so ids containing `/`, `?` or `#` stay inside one segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        session: Option<&Session>,
    ) -> Result<RequestBuilder, ApiError> {
        let builder = self.client.request(method, self.endpoint(segments)?);
        Ok(match session {
            Some(session) => builder.header("authorization", session.authorization()),
            None => builder,
        })
    }

    /// Sends the request and decodes a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T, ApiError> {
        let body = self.send(request, action).await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("{action}: response was not the expected JSON: {e}");
            ApiError::Parse(e)
        })
    }

    /// Sends the request and decodes a JSON array element by element. Elements
    /// that do not fit `T` are dropped; a body that is not an array is an error.
    async fn send_json_list<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Vec<T>, ApiError> {
        let body = self.send(request, action).await?;
        decode_list(&body, action)
    }

    /// Sends the request and discards whatever body comes back.
    async fn send_empty(&self, request: RequestBuilder, action: &str) -> Result<(), ApiError> {
        self.send(request, action).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("{action} failed: {e}");
            ApiError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("{action} returned {status}: {body}");
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        debug!("{action} succeeded ({status}, {} bytes)", body.len());
        Ok(body)
    }
}

fn decode_list<T: DeserializeOwned>(body: &str, action: &str) -> Result<Vec<T>, ApiError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body).map_err(|e| {
        warn!("{action}: response was not a JSON array: {e}");
        ApiError::Parse(e)
    })?;
    let total = raw.len();
    let items: Vec<T> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("{action}: skipping malformed element: {e}");
                None
            }
        })
        .collect();
    if items.len() < total {
        debug!("{action}: kept {} of {total} elements", items.len());
    }
    Ok(items)
}
