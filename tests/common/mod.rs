//! Shared test fixtures: deterministic adapters for the pipeline seams.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use sentitube::ai::AIError;
use sentitube::analysis::{CommentSource, SentimentClassifier};
use sentitube::storage::Comment;
use sentitube::youtube::SourceError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn comment(id: &str, video_id: &str, text: &str) -> Comment {
    Comment {
        comment_id: id.to_string(),
        video_id: video_id.to_string(),
        author: "viewer".to_string(),
        text: text.to_string(),
        published_at: Utc::now(),
        sentiment: None,
        analyzed_at: None,
    }
}

/// A comment source with a fixed result, counting invocations.
pub struct MockSource {
    comments: Vec<Comment>,
    provider_error: Option<String>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            provider_error: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn erroring(message: &str) -> Self {
        Self {
            comments: vec![],
            provider_error: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentSource for MockSource {
    async fn fetch_comments(&self, _video_id: &str) -> Result<Vec<Comment>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.provider_error {
            return Err(SourceError::Provider(message.clone()));
        }
        Ok(self.comments.clone())
    }
}

/// Maps comment text to a scripted label; anything off-script comes
/// back as the "error" marker the pipeline must treat as unclassifiable.
pub struct ScriptedClassifier {
    script: HashMap<String, String>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new(script: &[(&str, &str)]) -> Self {
        Self {
            script: script
                .iter()
                .map(|(text, label)| (text.to_string(), label.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentClassifier for ScriptedClassifier {
    async fn classify(&self, text: &str) -> Result<String, AIError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .script
            .get(text)
            .cloned()
            .unwrap_or_else(|| "error".to_string()))
    }
}
