pub mod anthropic {
    pub const API_BASE: &str = "https://api.anthropic.com";
    pub const MESSAGES_ENDPOINT: &str = "/v1/messages";
    pub const API_VERSION: &str = "2023-06-01";
    pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";
    pub const MODEL_ENV_VAR: &str = "ANTHROPIC_MODEL";
    pub const BASE_URL_ENV_VAR: &str = "ANTHROPIC_BASE_URL";
    pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;
    /// Cheapest model, used for the credential probe
    pub const CREDENTIAL_CHECK_MODEL: &str = "claude-3-5-haiku-20241022";
    pub const CREDENTIAL_CHECK_MAX_TOKENS: u32 = 10;
}
