//! Shared HTTP transport: one POST per call, status codes mapped onto [`ClientError`].

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::error::ClientError;

/// Transport settings, fixed when the client is built.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total time allowed for one exchange, connect through body
    pub timeout: Duration,
    /// Sent as `user-agent`; `completion-client/<version>` when unset
    pub user_agent: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: None,
        }
    }
}

fn default_user_agent() -> String {
    format!("completion-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Thin wrapper over `reqwest::Client`. Cloning the inner client is cheap and it
/// is safe to share between concurrent calls.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, ClientError> {
        let ua = config.user_agent.clone().unwrap_or_else(default_user_agent);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// Make a single POST request with a JSON body.
    ///
    /// Never retries. Non-success statuses become the matching [`ClientError`] variant.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, ClientError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let body_value = serde_json::to_value(body).map_err(|e| {
            ClientError::invalid_request(format!("Failed to serialize request body: {e}"))
        })?;

        let mut req_builder = self.client.post(url).json(&body_value);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| {
            if e.is_builder() {
                // Nothing was sent. The reqwest error is dropped since it may quote a header value.
                ClientError::Configuration(
                    "Failed to build request: a header value or the URL is invalid".to_string(),
                )
            } else {
                ClientError::Transport {
                    message: describe_transport_error(&e),
                    source: Box::new(e),
                }
            }
        })?;

        let status = res.status();
        let retry_after = parse_retry_after(res.headers());

        let response_text = res.text().await.map_err(|e| ClientError::Transport {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            return Err(error_for_status(status, retry_after, &response_text));
        }

        debug!(status = %status, "HTTP request successful");

        serde_json::from_str(&response_text).map_err(|e| ClientError::Upstream {
            message: "Failed to parse API response".to_string(),
            status_code: status.as_u16(),
            source: Some(Box::new(e)),
        })
    }
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        "Failed to connect".to_string()
    } else {
        "Failed to complete request".to_string()
    }
}

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Map a non-success status onto the error taxonomy.
pub(crate) fn error_for_status(
    status: StatusCode,
    retry_after: Option<Duration>,
    body: &str,
) -> ClientError {
    let message = extract_error_message(body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
    let status_code = status.as_u16();

    match status_code {
        401 | 403 => ClientError::Authentication {
            message,
            status_code,
        },
        429 => ClientError::RateLimit {
            message,
            retry_after,
        },
        400..=499 => ClientError::InvalidRequest {
            message,
            status_code: Some(status_code),
        },
        _ => ClientError::Upstream {
            message,
            status_code,
            source: None,
        },
    }
}

/// Pull a readable message out of an error body.
///
/// Understands `{"type":"error","error":{"type":..,"message":..}}`, falls back to the
/// raw body text. `None` for an empty body.
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(trimmed).ok();
    let from_envelope = parsed.as_ref().and_then(|value| {
        let error = value.get("error")?;
        let message = error.get("message")?.as_str()?;
        Some(match error.get("type").and_then(|t| t.as_str()) {
            Some(kind) => format!("{kind}: {message}"),
            None => message.to_string(),
        })
    });

    Some(from_envelope.unwrap_or_else(|| trimmed.to_string()))
}
