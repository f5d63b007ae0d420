//! Shared client logic for providers that speak the Messages API.
//!
//! This module contains reusable functionality for:
//! - Building wire requests from core types
//! - Sending them through the shared [`HttpClient`]
//! - Converting wire responses back to core types

use crate::{
    core::{
        ChatRole, ClientError, ContentBlock, GenerationRequest, GenerationResult, HttpClient,
        HttpClientConfig, StopReason, Usage,
    },
    messages::{
        request::{InputMessage, InputMessageRole, Request},
        response::{Response, ResponseContent},
    },
};

/// Configuration trait for providers that expose the Messages API
pub trait MessagesProviderConfig {
    /// Base URL for the API (e.g., `https://api.anthropic.com`)
    fn base_url(&self) -> &str;

    /// API endpoint for messages (e.g., `/v1/messages`)
    fn endpoint(&self) -> &str;

    /// Authentication header as (header_name, header_value) tuple
    fn auth_header(&self) -> (String, String);

    /// Additional headers to include with each request
    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Transport settings
    fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
    }
}

/// Shared client for providers using the Messages API
pub struct MessagesClient<P: MessagesProviderConfig> {
    pub config: P,
    http: HttpClient,
}

impl<P: MessagesProviderConfig> MessagesClient<P> {
    pub fn new(config: P) -> Result<Self, ClientError> {
        let http = HttpClient::new(&config.http_config())?;

        Ok(Self { config, http })
    }

    /// Validate, send and convert one request.
    #[tracing::instrument(
        name = "complete",
        skip(self, request),
        fields(model = %request.model, turns = request.turns.len()),
        err
    )]
    pub async fn complete(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ClientError> {
        request.validate()?;

        let api_request = build_request_payload(request);
        let api_response = self.make_api_request(api_request).await?;
        let result = convert_to_generation_result(api_response, &request.model);

        tracing::debug!(
            input_tokens = result.usage.input_tokens,
            output_tokens = result.usage.output_tokens,
            blocks = result.content.len(),
            "Completion received"
        );

        Ok(result)
    }

    /// Make an API request to the messages endpoint
    #[tracing::instrument(
        name = "http_request",
        skip(self, request),
        fields(
            base_url = %self.config.base_url(),
            endpoint = %self.config.endpoint()
        ),
        err
    )]
    pub(crate) async fn make_api_request(&self, request: Request) -> Result<Response, ClientError> {
        let url = format!(
            "{}{}",
            self.config.base_url().trim_end_matches('/'),
            self.config.endpoint()
        );

        let mut headers = vec![self.config.auth_header()];
        headers.extend(self.config.extra_headers());

        self.http.post_json(&url, &headers, &request).await
    }
}

pub(crate) fn build_request_payload(request: &GenerationRequest) -> Request {
    let messages = request
        .turns
        .iter()
        .map(|turn| InputMessage {
            role: match turn.role {
                ChatRole::User => InputMessageRole::User,
                ChatRole::Assistant => InputMessageRole::Assistant,
            },
            content: turn.content.clone(),
        })
        .collect();

    Request {
        model: request.model.clone(),
        max_tokens: request.max_tokens,
        messages,
        system: request.system.clone(),
        temperature: request.temperature,
    }
}

/// Convert a wire response to the provider-agnostic result.
///
/// Content blocks keep their order. A response that omits `model` is attributed
/// to the model that was requested.
pub(crate) fn convert_to_generation_result(res: Response, requested_model: &str) -> GenerationResult {
    let content = res
        .content
        .into_iter()
        .map(|block| match block {
            ResponseContent::Text { text } => ContentBlock::Text { text },
        })
        .collect();

    let model = if res.model.is_empty() {
        requested_model.to_string()
    } else {
        res.model
    };

    GenerationResult {
        id: res.id,
        model,
        content,
        stop_reason: res.stop_reason.as_deref().map(StopReason::from_wire),
        usage: Usage {
            input_tokens: res.usage.input_tokens,
            output_tokens: res.usage.output_tokens,
            cache_creation_input_tokens: res.usage.cache_creation_input_tokens,
            cache_read_input_tokens: res.usage.cache_read_input_tokens,
        },
    }
}
