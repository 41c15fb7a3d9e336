mod errors;
mod pipeline;
mod sentiment;
mod traits;

pub use errors::{AnalysisError, BoxError};
pub use pipeline::{extract_video_id, AnalysisReport, Resolution, SentimentPipeline, ANALYSIS_BATCH_LIMIT};
pub use sentiment::Sentiment;
pub use traits::{CommentSource, CommentStore, SentimentClassifier};
