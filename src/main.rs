use std::env;

use completion_client::provider::constants::anthropic;
use completion_client::{
    AnthropicClient, AnthropicConfig, ClientError, LlmProvider, Provider, Turn,
};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

const DEFAULT_PROMPT: &str = "Hello, Claude";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Logs go to stderr so stdout carries only the answer.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let key_var = Provider::Anthropic.default_api_key_env_var();
    let api_key = env::var(key_var).map_err(|_| {
        ClientError::Configuration(format!(
            "{key_var} must be set to use the {} provider",
            Provider::Anthropic
        ))
    })?;

    let mut config = AnthropicConfig::new(api_key);
    if let Ok(model) = env::var(anthropic::MODEL_ENV_VAR) {
        config = config.with_model(model);
    }
    if let Ok(base_url) = env::var(anthropic::BASE_URL_ENV_VAR) {
        config = config.with_base_url(base_url);
    }
    let client = AnthropicClient::new(config)?;

    let args: Vec<String> = env::args().skip(1).collect();
    let prompt = if args.is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        args.join(" ")
    };

    let result = client.complete(client.request(vec![Turn::user(prompt)])).await?;

    let text = result
        .first_text()
        .ok_or("Response contained no text block")?;
    println!("{text}");

    Ok(())
}
