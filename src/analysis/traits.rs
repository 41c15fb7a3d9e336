//! Adapter seams the pipeline depends on.
//!
//! The pipeline never talks to sqlite, the YouTube API or a model
//! provider directly — it goes through these traits, which the concrete
//! clients implement next to their own code. Tests swap in mocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::BoxError;
use super::sentiment::Sentiment;
use crate::ai::AIError;
use crate::storage::models::Comment;
use crate::youtube::SourceError;

/// Durable comment records keyed by video and comment identity.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn comments_for_video(&self, video_id: &str) -> Result<Vec<Comment>, BoxError>;

    /// The raw stored label, if any. `None` means the comment is
    /// unanalyzed (or unknown to the store).
    async fn cached_sentiment(&self, comment_id: &str) -> Result<Option<String>, BoxError>;

    /// Duplicate-tolerant bulk insert: a comment whose identity already
    /// exists is skipped, never overwritten. Returns how many rows were
    /// actually inserted.
    async fn insert_comments(&self, comments: &[Comment]) -> Result<usize, BoxError>;

    async fn update_sentiment(
        &self,
        comment_id: &str,
        sentiment: Sentiment,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), BoxError>;
}

/// Paginated fetch from the comment provider.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self, video_id: &str) -> Result<Vec<Comment>, SourceError>;
}

/// Single-comment text-to-label inference. Returns the raw model text;
/// normalization into the closed label set happens in the pipeline.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<String, AIError>;
}
