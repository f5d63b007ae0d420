//! Anthropic provider implementation.
//!
//! Requests go to `POST {base_url}/v1/messages` with the credential in `x-api-key`
//! and the pinned `anthropic-version` header.

use crate::core::{
    ClientError, Credential, GenerationRequest, GenerationResult, HttpClientConfig, LlmProvider,
    Turn,
};
use crate::messages::{MessagesClient, MessagesProviderConfig};
use crate::provider::constants::anthropic;
use async_trait::async_trait;

/// Anthropic-specific configuration, read once when the client is built.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub credential: Credential,
    pub base_url: String,
    /// Model used by [`AnthropicClient::request`]
    pub model: String,
    /// Output limit used by [`AnthropicClient::request`]
    pub max_tokens: u32,
    pub http_config: HttpClientConfig,
}

impl AnthropicConfig {
    pub fn new(credential: impl Into<Credential>) -> Self {
        Self {
            credential: credential.into(),
            base_url: anthropic::API_BASE.to_string(),
            model: anthropic::DEFAULT_MODEL.to_string(),
            max_tokens: anthropic::DEFAULT_MAX_TOKENS,
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    fn validate(&self) -> Result<(), ClientError> {
        if self.credential.is_blank() {
            return Err(ClientError::Configuration(format!(
                "Missing credential. Pass an API key (usually from {}).",
                anthropic::API_KEY_ENV_VAR
            )));
        }

        if reqwest::header::HeaderValue::from_str(self.credential.expose()).is_err() {
            return Err(ClientError::Configuration(
                "Credential contains characters that cannot be sent in a header \
                 (check for a trailing newline)"
                    .to_string(),
            ));
        }

        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ClientError::Configuration(format!("Invalid base URL '{}': {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ClientError::Configuration(
                "Default model must not be empty".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ClientError::Configuration(
                "Default max_tokens must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl MessagesProviderConfig for AnthropicConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> &str {
        anthropic::MESSAGES_ENDPOINT
    }

    fn auth_header(&self) -> (String, String) {
        ("x-api-key".to_string(), self.credential.expose().to_string())
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        vec![(
            "anthropic-version".to_string(),
            anthropic::API_VERSION.to_string(),
        )]
    }

    fn http_config(&self) -> HttpClientConfig {
        self.http_config.clone()
    }
}

/// Outcome of [`AnthropicClient::check_credential`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Valid,
    /// The service rejected the credential
    Invalid { reason: String },
    /// An organisation admin key, which cannot generate messages
    AdminKey,
}

/// Client for the Anthropic Messages API.
///
/// Holds only immutable configuration, so one instance can serve any number of
/// concurrent [`complete`](LlmProvider::complete) calls.
pub struct AnthropicClient {
    messages_client: MessagesClient<AnthropicConfig>,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            messages_client: MessagesClient::new(config)?,
        })
    }

    pub fn config(&self) -> &AnthropicConfig {
        &self.messages_client.config
    }

    /// Build a request from the configured default model and output limit.
    pub fn request(&self, turns: Vec<Turn>) -> GenerationRequest {
        let config = self.config();
        GenerationRequest::new(config.model.clone(), config.max_tokens, turns)
    }

    /// Probe whether the service accepts this client's credential.
    ///
    /// Admin keys are reported without a network call. Otherwise one minimal
    /// request is sent; only an authentication failure counts as `Invalid`, every
    /// other error is returned unchanged.
    pub async fn check_credential(&self) -> Result<CredentialStatus, ClientError> {
        if self.config().credential.is_admin_key() {
            return Ok(CredentialStatus::AdminKey);
        }

        let probe = GenerationRequest::new(
            anthropic::CREDENTIAL_CHECK_MODEL,
            anthropic::CREDENTIAL_CHECK_MAX_TOKENS,
            vec![Turn::user("Hi")],
        );

        match self.messages_client.complete(&probe).await {
            Ok(_) => Ok(CredentialStatus::Valid),
            Err(ClientError::Authentication { message, .. }) => {
                Ok(CredentialStatus::Invalid { reason: message })
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicClient {
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResult, ClientError> {
        self.messages_client.complete(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_configuration_error(config: AnthropicConfig, expected: &str) {
        match AnthropicClient::new(config) {
            Err(ClientError::Configuration(message)) => assert!(
                message.contains(expected),
                "expected message to contain '{expected}', got '{message}'"
            ),
            Err(other) => panic!("expected configuration error, got {other:?}"),
            Ok(_) => panic!("expected configuration error, got a client"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = AnthropicConfig::new("sk-ant-api03-test");
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.max_tokens, 1000);
    }

    #[test]
    fn test_empty_credential_is_configuration_error() {
        assert_configuration_error(AnthropicConfig::new(""), "Missing credential");
        assert_configuration_error(AnthropicConfig::new("   "), "Missing credential");
    }

    #[test]
    fn test_credential_not_valid_as_header_is_configuration_error() {
        assert_configuration_error(
            AnthropicConfig::new("sk-ant-api03-secret\n"),
            "cannot be sent in a header",
        );

        let err = AnthropicClient::new(AnthropicConfig::new("sk-ant-api03-secret\r\n"))
            .err()
            .expect("rejected");
        assert!(!err.is_transient());
        assert!(!err.to_string().contains("sk-ant-api03-secret"));
    }

    #[test]
    fn test_bad_base_url_is_configuration_error() {
        assert_configuration_error(
            AnthropicConfig::new("key").with_base_url("not a url"),
            "Invalid base URL",
        );
        assert_configuration_error(
            AnthropicConfig::new("key").with_base_url("ftp://example.com"),
            "http or https",
        );
    }

    #[test]
    fn test_zero_default_max_tokens_is_configuration_error() {
        assert_configuration_error(AnthropicConfig::new("key").with_max_tokens(0), "max_tokens");
    }

    #[test]
    fn test_configuration_error_does_not_echo_credential() {
        let err = AnthropicClient::new(
            AnthropicConfig::new("sk-ant-api03-topsecret").with_base_url("::"),
        )
        .err()
        .expect("invalid url");
        assert!(!err.to_string().contains("topsecret"));
        assert!(!format!("{err:?}").contains("topsecret"));
    }

    #[test]
    fn test_request_uses_configured_defaults() {
        let client = AnthropicClient::new(
            AnthropicConfig::new("key")
                .with_model("claude-3-5-haiku-20241022")
                .with_max_tokens(42),
        )
        .expect("client");

        let request = client.request(vec![Turn::user("Hello")]);
        assert_eq!(request.model, "claude-3-5-haiku-20241022");
        assert_eq!(request.max_tokens, 42);
        assert_eq!(request.turns, vec![Turn::user("Hello")]);
    }

    #[test]
    fn test_headers_carry_credential_and_version() {
        let config = AnthropicConfig::new("sk-ant-api03-abc");
        assert_eq!(
            config.auth_header(),
            ("x-api-key".to_string(), "sk-ant-api03-abc".to_string())
        );
        assert_eq!(
            config.extra_headers(),
            vec![("anthropic-version".to_string(), "2023-06-01".to_string())]
        );
        assert!(!format!("{config:?}").contains("sk-ant-api03-abc"));
    }
}
