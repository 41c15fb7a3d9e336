use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info, warn};
use url::Url;

use super::errors::AnalysisError;
use super::sentiment::Sentiment;
use super::traits::{CommentSource, CommentStore, SentimentClassifier};
use crate::storage::models::Comment;
use crate::youtube::SourceError;

/// Upper bound on classifier calls per request. Comments beyond this
/// are not analyzed and do not appear in the aggregate.
pub const ANALYSIS_BATCH_LIMIT: usize = 20;

/// Per-video aggregate, computed per request and never persisted.
/// Each share is rounded to one decimal independently, so the three
/// values may not sum to exactly 100.0.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub total_comments: usize,
}

/// Outcome of resolving a single comment. `Unclassified` is a
/// communicated result, not an error — the caller decides whether it
/// is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Label(Sentiment),
    Unclassified,
}

/// Extract the video identifier from a watch-page URL (`v` query
/// parameter) or a `youtu.be` short link.
pub fn extract_video_id(video_url: &str) -> Result<String, AnalysisError> {
    let parsed =
        Url::parse(video_url).map_err(|_| AnalysisError::InvalidUrl(video_url.to_string()))?;

    let from_query = parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned());

    let video_id = match from_query {
        Some(id) => id,
        None if parsed.host_str() == Some("youtu.be") => parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or("")
            .to_string(),
        None => String::new(),
    };

    if video_id.is_empty() {
        return Err(AnalysisError::InvalidUrl(video_url.to_string()));
    }
    Ok(video_id)
}

pub struct SentimentPipeline {
    store: Arc<dyn CommentStore>,
    source: Arc<dyn CommentSource>,
    classifier: Arc<dyn SentimentClassifier>,
}

impl SentimentPipeline {
    pub fn new(
        store: Arc<dyn CommentStore>,
        source: Arc<dyn CommentSource>,
        classifier: Arc<dyn SentimentClassifier>,
    ) -> Self {
        Self {
            store,
            source,
            classifier,
        }
    }

    /// Comment retrieval stage: the store is the source of truth once
    /// populated. Only on an empty store does this fall back to the
    /// provider and backfill.
    pub async fn retrieve_comments(&self, video_id: &str) -> Result<Vec<Comment>, AnalysisError> {
        let stored = self
            .store
            .comments_for_video(video_id)
            .await
            .map_err(AnalysisError::Retrieval)?;
        if !stored.is_empty() {
            debug!("Found {} stored comments for video {}", stored.len(), video_id);
            return Ok(stored);
        }

        info!("No comments in store for video {}, fetching from source...", video_id);
        let fetched = self
            .source
            .fetch_comments(video_id)
            .await
            .map_err(|e| match e {
                SourceError::Provider(msg) => {
                    warn!("Provider error for video {}: {}", video_id, msg);
                    AnalysisError::NoCommentsFound(video_id.to_string())
                }
                other => AnalysisError::Retrieval(Box::new(other)),
            })?;
        if fetched.is_empty() {
            return Err(AnalysisError::NoCommentsFound(video_id.to_string()));
        }

        // Partial persistence is acceptable: duplicates are skipped by
        // the store and a failed backfill does not fail the stage.
        match self.store.insert_comments(&fetched).await {
            Ok(inserted) => info!("Stored {} of {} fetched comments", inserted, fetched.len()),
            Err(e) => warn!("Failed to store fetched comments for video {}: {}", video_id, e),
        }

        Ok(fetched)
    }

    /// Sentiment resolution stage: cached label if present, otherwise
    /// classify and persist. Writes at most one label per call, only on
    /// a cache miss.
    pub async fn resolve_sentiment(&self, comment: &Comment) -> Result<Resolution, AnalysisError> {
        let cached = self
            .store
            .cached_sentiment(&comment.comment_id)
            .await
            .map_err(AnalysisError::Retrieval)?;
        if let Some(raw) = cached {
            match Sentiment::from_str(&raw) {
                Ok(sentiment) => {
                    debug!("Using cached sentiment for {}: {}", comment.comment_id, sentiment);
                    return Ok(Resolution::Label(sentiment));
                }
                // A stored value outside the label set is treated as a
                // cache miss and reclassified.
                Err(()) => warn!(
                    "Ignoring unrecognized cached sentiment {:?} for {}",
                    raw, comment.comment_id
                ),
            }
        }

        debug!("No cached sentiment for {}, calling classifier...", comment.comment_id);
        let raw = match self.classifier.classify(&comment.text).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Classifier failed for comment {}: {}", comment.comment_id, e);
                return Ok(Resolution::Unclassified);
            }
        };

        let sentiment = match Sentiment::from_str(&raw) {
            Ok(sentiment) => sentiment,
            Err(()) => {
                warn!("Unexpected sentiment value {:?} for comment {}", raw, comment.comment_id);
                return Ok(Resolution::Unclassified);
            }
        };

        // The label is returned even if the write fails; a later call
        // may classify this comment again (at-least-once semantics).
        if let Err(e) = self
            .store
            .update_sentiment(&comment.comment_id, sentiment, Utc::now())
            .await
        {
            error!("{}", AnalysisError::Persistence(e));
        }

        Ok(Resolution::Label(sentiment))
    }

    /// Batch analysis orchestrator: retrieve, take a bounded prefix,
    /// resolve each comment with per-item fault isolation, aggregate.
    pub async fn analyze_video(&self, video_url: &str) -> Result<AnalysisReport, AnalysisError> {
        let video_id = extract_video_id(video_url)?;
        info!("Analyzing video: {}", video_id);

        let comments = self.retrieve_comments(&video_id).await?;
        info!("Processing {} comments", comments.len());

        let mut positive = 0usize;
        let mut negative = 0usize;
        let mut neutral = 0usize;
        let mut analyzed = 0usize;

        for comment in comments.iter().take(ANALYSIS_BATCH_LIMIT) {
            match self.resolve_sentiment(comment).await {
                Ok(Resolution::Label(sentiment)) => {
                    match sentiment {
                        Sentiment::Positive => positive += 1,
                        Sentiment::Negative => negative += 1,
                        Sentiment::Neutral => neutral += 1,
                    }
                    analyzed += 1;
                }
                // Already logged by the resolution stage; the comment
                // is excluded from both numerator and denominator.
                Ok(Resolution::Unclassified) => {}
                Err(e) => {
                    error!("Error analyzing comment {}: {}", comment.comment_id, e);
                }
            }
        }

        if analyzed == 0 {
            return Err(AnalysisError::AnalysisFailed(video_id));
        }

        Ok(AnalysisReport {
            positive: share(positive, analyzed),
            negative: share(negative, analyzed),
            neutral: share(neutral, analyzed),
            total_comments: analyzed,
        })
    }
}

fn share(count: usize, analyzed: usize) -> f64 {
    (count as f64 / analyzed as f64 * 1000.0).round() / 10.0
}
