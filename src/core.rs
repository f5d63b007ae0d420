pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::ClientError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::LlmProvider;
pub use types::{
    ChatRole, ContentBlock, Credential, GenerationRequest, GenerationResult, StopReason, Turn,
    Usage,
};
