use async_trait::async_trait;

use super::{
    error::ClientError,
    types::{GenerationRequest, GenerationResult},
};

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one request and wait for the complete result.
    ///
    /// Exactly one exchange with the service per call; failures are returned as-is.
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResult, ClientError>;
}
