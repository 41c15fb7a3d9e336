use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid video URL: no video ID found in {0:?}")]
    InvalidUrl(String),

    #[error("No comments found for video {0}")]
    NoCommentsFound(String),

    #[error("No comments were successfully analyzed for video {0}")]
    AnalysisFailed(String),

    #[error("Failed to retrieve comments: {0}")]
    Retrieval(#[source] BoxError),

    #[error("Failed to persist sentiment: {0}")]
    Persistence(#[source] BoxError),
}
