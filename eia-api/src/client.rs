use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::query::redacted_query;

/// Base URL for the EIA Open Data API v2.
pub const EIA_API_BASE_URL: &str = "https://api.eia.gov/v2";

/// Upper bound on upstream error text carried inside an [`EiaError`], so a
/// misbehaving endpoint cannot grow error messages without limit.
const MAX_ERROR_TEXT_LEN: usize = 600;

/// Configuration for the EIA client
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL for the EIA API (e.g., "https://api.eia.gov/v2")
    pub base_url: String,
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// API key; required for every upstream call. When absent the client
    /// fails each request with [`EiaError::MissingCredential`] instead of
    /// attempting network I/O.
    pub api_key: Option<String>,
    /// Per-request timeout. The upstream API is slow for large tabular
    /// pulls, so the default is generous.
    pub timeout_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            base_url: EIA_API_BASE_URL.to_owned(),
            user_agent: "eia-api-rs/0.1".to_owned(),
            api_key: None,
            timeout_secs: 75,
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Errors that can occur when talking to the EIA API.
///
/// Every failure mode of a request is normalized into exactly one of these
/// variants at the transport boundary; nothing panics past it. The
/// credential never appears in any variant or its `Display` output.
#[derive(Debug, Error)]
pub enum EiaError {
    /// No API key is configured. Terminal for the call, never retried,
    /// and detected before any network I/O happens.
    #[error("EIA API key is not configured; set the EIA_API_KEY environment variable")]
    MissingCredential,

    /// The upstream API rejected the request with a non-2xx status.
    /// `text` carries the upstream error message verbatim when the error
    /// body was parseable, and `details` the full parsed error body.
    #[error("EIA API error ({status}): {text}")]
    HttpStatus {
        status: u16,
        text: String,
        details: Option<Value>,
    },

    /// Network-level failure: DNS, connection refused, or timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream returned a 2xx response whose body was not valid JSON.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Anything not anticipated above.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Async client for the EIA Open Data API v2.
///
/// Issues one GET per logical operation against the route hierarchy,
/// appends the API key, and normalizes every failure mode into
/// [`EiaError`]. No retries are performed; a single failed attempt is
/// terminal for that call.
///
/// ```rust,no_run
/// use eia_api::{Configuration, EiaClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Configuration::new().with_api_key("your-api-key");
/// let client = EiaClient::with_config(config)?;
///
/// let body = client.request("electricity", &[]).await?;
/// println!("{body}");
/// # Ok(())
/// # }
/// ```
pub struct EiaClient {
    config: Configuration,
    http: reqwest::Client,
}

impl std::fmt::Debug for EiaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EiaClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl EiaClient {
    /// Create a client with default configuration (no API key).
    pub fn new() -> Result<Self, EiaError> {
        Self::with_config(Configuration::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: Configuration) -> Result<Self, EiaError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| EiaError::Unexpected(e.to_string()))?;

        Ok(Self { config, http })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Issue a single GET against `route_path` with the given query
    /// parameters, returning the parsed JSON body.
    ///
    /// The route path is joined to the base URL with exactly one slash
    /// regardless of leading/trailing slashes on either side, and the API
    /// key is appended as the last query parameter.
    pub async fn request(
        &self,
        route_path: &str,
        params: &[(String, String)],
    ) -> Result<Value, EiaError> {
        let Some(api_key) = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
        else {
            return Err(EiaError::MissingCredential);
        };

        let base = self.config.base_url.trim_end_matches('/');
        let path = route_path.trim_matches('/');
        let url = if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        };

        tracing::debug!(url = %url, query = %redacted_query(params), "requesting EIA API");

        let mut query: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        query.push(("api_key", api_key));

        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(classify_reqwest_error)?;

        if status.is_success() {
            serde_json::from_str(&text)
                .map_err(|e| EiaError::Malformed(format!("invalid JSON from upstream: {e}")))
        } else {
            Err(http_status_error(status.as_u16(), &text))
        }
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> EiaError {
    if err.is_builder() || err.is_decode() {
        EiaError::Unexpected(err.to_string())
    } else {
        // Connect failures, DNS errors, and timeouts all surface here.
        EiaError::Network(err.to_string())
    }
}

/// Build an [`EiaError::HttpStatus`] from a non-2xx response body. The
/// upstream frequently returns structured error JSON even on 4xx/5xx, in
/// which case the parsed body is kept as details and its error message is
/// surfaced verbatim.
fn http_status_error(status: u16, body: &str) -> EiaError {
    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => {
            let text = upstream_error_text(&parsed)
                .unwrap_or_else(|| truncate(body, MAX_ERROR_TEXT_LEN));
            EiaError::HttpStatus {
                status,
                text,
                details: Some(parsed),
            }
        }
        Err(_) => EiaError::HttpStatus {
            status,
            text: truncate(body, MAX_ERROR_TEXT_LEN),
            details: None,
        },
    }
}

/// Pull the upstream's own error message out of an error body, looking at
/// the root and inside the `response` envelope.
fn upstream_error_text(body: &Value) -> Option<String> {
    for candidate in [body.get("error"), body.get("response").and_then(|r| r.get("error"))] {
        match candidate {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(other) if !other.is_null() => return Some(other.to_string()),
            _ => {}
        }
    }
    None
}

/// Truncate to at most `max` bytes on a char boundary.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... (truncated)", &text[..end])
}
