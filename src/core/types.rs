use std::fmt;

use crate::core::error::ClientError;

/// Secret used to authenticate every request.
///
/// The value never shows up in `Debug` output, logs or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Admin keys authenticate the organisation endpoints, not message generation.
    pub fn is_admin_key(&self) -> bool {
        self.0.starts_with(ADMIN_KEY_PREFIX)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

const ADMIN_KEY_PREFIX: &str = "sk-ant-admin";

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of the conversation history.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: ChatRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    /// Upper bound on generated tokens, must be positive
    pub max_tokens: u32,
    /// Chronological history, must not be empty
    pub turns: Vec<Turn>,
    /// System prompt sent alongside the turns
    pub system: Option<String>,
    /// Sampling temperature in `0.0..=1.0`
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, max_tokens: u32, turns: Vec<Turn>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            turns,
            system: None,
            temperature: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Check the request invariants without touching the network.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.turns.is_empty() {
            return Err(ClientError::invalid_request(
                "Missing turns. Make sure to add at least one turn.",
            ));
        }

        if self.max_tokens == 0 {
            return Err(ClientError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ClientError::invalid_request("Missing model identifier"));
        }

        if let Some(index) = self.turns.iter().position(|t| t.content.is_empty()) {
            return Err(ClientError::invalid_request(format!(
                "Turn {index} has empty content"
            )));
        }

        if let Some(temperature) = self.temperature
            && !(0.0..=1.0).contains(&temperature)
        {
            return Err(ClientError::invalid_request(format!(
                "temperature must be between 0.0 and 1.0, got {temperature}"
            )));
        }

        Ok(())
    }
}

/// One unit of model output.
///
/// Closed on purpose: consumers match exhaustively, so a new block kind shows up
/// as a compile error at every consumption site instead of being skipped silently.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ToolUse,
    PauseTurn,
    Refusal,
    /// A reason this client does not know about yet
    Other,
}

impl StopReason {
    pub(crate) fn from_wire(value: &str) -> Self {
        match value {
            "end_turn" => StopReason::EndTurn,
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            "tool_use" => StopReason::ToolUse,
            "pause_turn" => StopReason::PauseTurn,
            "refusal" => StopReason::Refusal,
            _ => StopReason::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub cache_creation_input_tokens: Option<u32>,
    pub cache_read_input_tokens: Option<u32>,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub id: String,
    pub model: String,
    /// Blocks exactly as the service returned them, in order
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<StopReason>,
    pub usage: Usage,
}

impl GenerationResult {
    /// Text of the first block, if that block is text.
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first()? {
            ContentBlock::Text { text } => Some(text),
        }
    }

    /// All text blocks joined in order.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> GenerationRequest {
        GenerationRequest::new("claude-3-5-sonnet-20241022", 100, vec![Turn::user("Hello")])
    }

    fn assert_local_invalid(request: GenerationRequest, expected: &str) {
        match request.validate() {
            Err(ClientError::InvalidRequest {
                message,
                status_code: None,
            }) => assert!(
                message.contains(expected),
                "expected message to contain '{expected}', got '{message}'"
            ),
            other => panic!("expected local invalid request error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
        assert!(valid_request().with_temperature(1.0).validate().is_ok());
    }

    #[test]
    fn test_empty_turns_rejected() {
        let mut request = valid_request();
        request.turns.clear();
        assert_local_invalid(request, "turns");
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let mut request = valid_request();
        request.max_tokens = 0;
        assert_local_invalid(request, "max_tokens");
    }

    #[test]
    fn test_blank_model_rejected() {
        let mut request = valid_request();
        request.model = "  ".to_string();
        assert_local_invalid(request, "model");
    }

    #[test]
    fn test_empty_turn_content_rejected() {
        let mut request = valid_request();
        request.turns.push(Turn::assistant(""));
        assert_local_invalid(request, "Turn 1");
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        assert_local_invalid(valid_request().with_temperature(1.5), "temperature");
        assert_local_invalid(valid_request().with_temperature(-0.1), "temperature");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("sk-ant-api03-secret");
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
        assert_eq!(credential.to_string(), "[REDACTED]");
        assert_eq!(format!("key={credential}"), "key=[REDACTED]");
    }

    #[test]
    fn test_total_tokens_saturates() {
        let usage = Usage {
            input_tokens: u32::MAX,
            output_tokens: 5,
            ..Default::default()
        };
        assert_eq!(usage.total_tokens(), u32::MAX);
    }

    #[test]
    fn test_admin_key_detection() {
        assert!(Credential::new("sk-ant-admin01-abc").is_admin_key());
        assert!(!Credential::new("sk-ant-api03-abc").is_admin_key());
        assert!(Credential::new("   ").is_blank());
    }

    #[test]
    fn test_stop_reason_unknown_maps_to_other() {
        assert_eq!(StopReason::from_wire("end_turn"), StopReason::EndTurn);
        assert_eq!(StopReason::from_wire("max_tokens"), StopReason::MaxTokens);
        assert_eq!(StopReason::from_wire("brand_new_reason"), StopReason::Other);
    }

    #[test]
    fn test_result_text_helpers() {
        let result = GenerationResult {
            id: "msg_1".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            content: vec![
                ContentBlock::Text {
                    text: "Hello".to_string(),
                },
                ContentBlock::Text {
                    text: ", world".to_string(),
                },
            ],
            stop_reason: Some(StopReason::EndTurn),
            usage: Usage {
                input_tokens: 3,
                output_tokens: 4,
                ..Default::default()
            },
        };

        assert_eq!(result.first_text(), Some("Hello"));
        assert_eq!(result.text(), "Hello, world");
        assert_eq!(result.usage.total_tokens(), 7);

        let empty = GenerationResult {
            content: vec![],
            ..result
        };
        assert_eq!(empty.first_text(), None);
    }
}
