use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The client could not be constructed from the given configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request was rejected locally before sending, or by the service as malformed.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        /// `None` when the request never left the process
        status_code: Option<u16>,
    },

    /// The credential was rejected (401/403).
    #[error("Authentication failed ({status_code}): {message}")]
    Authentication { message: String, status_code: u16 },

    /// The service throttled the request (429).
    #[error("Rate limited: {message}")]
    RateLimit {
        message: String,
        /// Value of the `retry-after` header, if the service sent one
        retry_after: Option<Duration>,
    },

    /// Network-level failure: connect, DNS, timeout or an interrupted body.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The service failed on its side, or answered with a body that breaks the contract.
    #[error("Upstream error ({status_code}): {message}")]
    Upstream {
        message: String,
        status_code: u16,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClientError {
    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        ClientError::InvalidRequest {
            message: message.into(),
            status_code: None,
        }
    }

    /// Whether retrying the identical request later may succeed.
    ///
    /// The client itself never retries; this is for callers that want to.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::RateLimit { .. } | ClientError::Transport { .. } | ClientError::Upstream { .. }
        )
    }

    /// HTTP status code returned by the service, if the failure came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::InvalidRequest { status_code, .. } => *status_code,
            ClientError::Authentication { status_code, .. }
            | ClientError::Upstream { status_code, .. } => Some(*status_code),
            ClientError::RateLimit { .. } => Some(429),
            ClientError::Configuration(_) | ClientError::Transport { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        let rate = ClientError::RateLimit {
            message: "slow down".to_string(),
            retry_after: None,
        };
        let upstream = ClientError::Upstream {
            message: "overloaded".to_string(),
            status_code: 529,
            source: None,
        };
        let auth = ClientError::Authentication {
            message: "bad key".to_string(),
            status_code: 401,
        };

        assert!(rate.is_transient());
        assert!(upstream.is_transient());
        assert!(!auth.is_transient());
        assert!(!ClientError::invalid_request("no turns").is_transient());
        assert!(!ClientError::Configuration("missing key".to_string()).is_transient());
    }

    #[test]
    fn test_status_code_only_for_service_responses() {
        assert_eq!(ClientError::invalid_request("local").status_code(), None);
        assert_eq!(
            ClientError::InvalidRequest {
                message: "remote".to_string(),
                status_code: Some(400),
            }
            .status_code(),
            Some(400)
        );
        assert_eq!(
            ClientError::RateLimit {
                message: String::new(),
                retry_after: None,
            }
            .status_code(),
            Some(429)
        );
    }
}
