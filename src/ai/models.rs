use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AIError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    APIError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait AIProvider: Send + Sync {
    async fn generate_response(&self, prompt: &str) -> Result<String, AIError>;
}
