//! HTTP client for the WooCommerce REST v3 catalog endpoints.

mod catalog;
mod update;

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;

use wooprice_core::{AppConfig, AuthMode};

use crate::auth::{oauth_header, Credentials};
use crate::error::WooError;
use crate::types::{PriceUpdate, WooErrorBody};

/// Upper bound on the connect phase, never longer than the request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// How much of a non-JSON error body is kept for the error message.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Client for a single store's REST API.
///
/// Every call is a single request with the configured timeout. Failures are
/// returned as typed [`WooError`]s and never retried.
pub struct WooClient {
    pub(super) client: Client,
    pub(super) base_url: Url,
    pub(super) credentials: Credentials,
    /// Always resolved; never [`AuthMode::Auto`].
    pub(super) auth_mode: AuthMode,
}

impl WooClient {
    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`WooClient::with_options`].
    pub fn new(config: &AppConfig) -> Result<Self, WooError> {
        Self::with_options(
            &config.base_url,
            Credentials::new(config.consumer_key.clone(), config.consumer_secret.clone()),
            config.auth_mode,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client for `base_url` (for testing with wiremock, or when the
    /// caller manages configuration itself).
    ///
    /// # Errors
    ///
    /// Returns [`WooError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed, or [`WooError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL.
    pub fn with_options(
        base_url: &str,
        credentials: Credentials,
        auth_mode: AuthMode,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, WooError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(CONNECT_TIMEOUT_SECS)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative joins append to the REST
        // root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| WooError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(WooError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http:// or https:// URL".to_owned(),
            });
        }

        let auth_mode = auth_mode.resolve(parsed.as_str());
        tracing::debug!(base_url = %parsed, %auth_mode, timeout_secs, "store client ready");

        Ok(Self {
            client,
            base_url: parsed,
            credentials,
            auth_mode,
        })
    }

    /// The normalized REST root every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The authentication scheme in use, with `auto` already resolved.
    #[must_use]
    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    /// Resolves `path` against the REST root and appends `query` pairs,
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::InvalidBaseUrl`] if the join fails.
    pub(super) fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, WooError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| WooError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot append \"{path}\": {e}"),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends one authenticated request and asserts a 2xx status.
    ///
    /// # Errors
    ///
    /// - [`WooError::Http`] on network failure or timeout.
    /// - [`WooError::UnexpectedStatus`] on any non-2xx status, carrying the
    ///   store's error message when it sent one.
    /// - [`WooError::Signing`] if the OAuth signature cannot be computed.
    pub(super) async fn send(
        &self,
        method: Method,
        url: &Url,
        body: Option<&PriceUpdate>,
    ) -> Result<Response, WooError> {
        let mut request = self.client.request(method.clone(), url.clone());
        request = match self.auth_mode {
            AuthMode::Basic => request.basic_auth(
                &self.credentials.consumer_key,
                Some(&self.credentials.consumer_secret),
            ),
            AuthMode::OAuth1 | AuthMode::Auto => {
                request.header(AUTHORIZATION, oauth_header(&method, url, &self.credentials)?)
            }
        };
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, "sending request");
        let response = request.send().await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, timeout = e.is_timeout(), "request failed");
            WooError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = failure_detail(response.text().await, url);
            tracing::warn!(%method, %url, status = status.as_u16(), %detail, "store rejected request");
            return Err(WooError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                detail,
            });
        }

        Ok(response)
    }

    /// Reads the response body and parses it as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::Http`] if the body cannot be read and
    /// [`WooError::Deserialize`] if it does not match `T`.
    pub(super) async fn read_json<T: DeserializeOwned>(
        response: Response,
        context: impl FnOnce() -> String,
    ) -> Result<T, WooError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| WooError::Deserialize {
            context: context(),
            source,
        })
    }
}

/// Detail for a non-2xx response whose body may not have been readable.
pub(crate) fn failure_detail<E: std::fmt::Display>(body: Result<String, E>, url: &Url) -> String {
    match body {
        Ok(text) => error_detail(&text),
        Err(e) => {
            tracing::warn!(%url, error = %e, "failed to read error response body");
            format!("(could not read response body: {e})")
        }
    }
}

/// Human-readable reason from an error response body.
///
/// Prefers the REST API's `{"code": ..., "message": ...}` envelope and falls
/// back to a short preview of the raw body.
pub(crate) fn error_detail(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<WooErrorBody>(body) {
        match (envelope.message, envelope.code) {
            (Some(message), Some(code)) => return format!("{message} ({code})"),
            (Some(message), None) => return message,
            (None, Some(code)) => return code,
            (None, None) => {}
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty response body)".to_owned();
    }
    trimmed.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
