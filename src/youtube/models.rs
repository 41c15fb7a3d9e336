use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    /// The provider itself rejected the request or had nothing to give
    /// (missing or private video, empty first page).
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
