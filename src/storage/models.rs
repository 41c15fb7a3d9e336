use chrono::{DateTime, Utc};
use crate::analysis::Sentiment;

/// A single stored comment. Created when fetched from the provider,
/// mutated only to attach a sentiment label, never deleted.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: String,
    pub video_id: String,
    pub author: String,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub sentiment: Option<Sentiment>,
    pub analyzed_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_analyzed(&self) -> bool {
        self.sentiment.is_some()
    }
}
