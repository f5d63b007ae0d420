//! # completion-client
//!
//! A small, strongly-typed client for the Anthropic Messages API: one request in,
//! one structured result out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use completion_client::{AnthropicClient, AnthropicConfig, LlmProvider, Turn};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AnthropicClient::new(AnthropicConfig::new("sk-ant-..."))?;
//!     let result = client
//!         .complete(client.request(vec![Turn::user("Hello, Claude")]))
//!         .await?;
//!
//!     if let Some(text) = result.first_text() {
//!         println!("{text}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The client never reads the environment and never retries. Every failure is a
//! distinct [`ClientError`] variant; see [`ClientError::is_transient`] for
//! building your own retry policy.

pub mod core;
pub mod messages;
pub mod pricing;
pub mod provider;

pub use crate::core::{
    ChatRole, ClientError, ContentBlock, Credential, GenerationRequest, GenerationResult,
    HttpClientConfig, LlmProvider, StopReason, Turn, Usage,
};
pub use pricing::{CostBreakdown, ModelPricing, pricing_for};
pub use provider::{AnthropicClient, AnthropicConfig, CredentialStatus, Provider};
