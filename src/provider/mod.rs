pub mod constants;
pub(crate) mod anthropic;

pub use anthropic::{AnthropicClient, AnthropicConfig, CredentialStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Anthropic => write!(f, "Anthropic"),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::Anthropic => constants::anthropic::API_KEY_ENV_VAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_display_and_key_var() {
        assert_eq!(Provider::Anthropic.to_string(), "Anthropic");
        assert_eq!(
            Provider::Anthropic.default_api_key_env_var(),
            "ANTHROPIC_API_KEY"
        );
    }
}
