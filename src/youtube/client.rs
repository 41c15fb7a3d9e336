use std::future::Future;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info};
use reqwest::Client;
use serde_json::Value;

use super::models::SourceError;
use crate::analysis::CommentSource;
use crate::storage::models::Comment;

const COMMENT_THREADS_URL: &str = "https://www.googleapis.com/youtube/v3/commentThreads";

/// Stop fetching once this many comments have been collected.
pub const MAX_COMMENTS: usize = 100;
/// Or after this many pages, whichever comes first.
pub const MAX_PAGES: usize = 5;

const PAGE_SIZE: usize = 20;

/// One page of provider results, already mapped to comments.
struct CommentPage {
    comments: Vec<Comment>,
    next_page_token: Option<String>,
}

pub struct YouTubeClient {
    api_key: String,
    client: Client,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: Client::new(),
        }
    }

    /// Paginated fetch of the newest top-level comments for a video.
    pub async fn fetch_latest_comments(&self, video_id: &str) -> Result<Vec<Comment>, SourceError> {
        info!("Fetching latest comments for video ID: {}", video_id);

        let comments =
            collect_comment_pages(|token| self.fetch_page(video_id, token)).await?;

        info!("Fetched {} comments.", comments.len());
        Ok(comments)
    }

    async fn fetch_page(
        &self,
        video_id: &str,
        page_token: Option<String>,
    ) -> Result<CommentPage, SourceError> {
        let mut url = format!(
            "{}?part=snippet&videoId={}&maxResults={}&order=time&key={}",
            COMMENT_THREADS_URL,
            video_id.trim(),
            PAGE_SIZE,
            self.api_key
        );
        if let Some(token) = &page_token {
            url.push_str(&format!("&pageToken={}", token));
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("Failed to fetch comments. Status: {}, Body: {}", status, error_body);
            return Err(SourceError::Provider(format!(
                "Failed to fetch comments. Status: {}, Body: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        Ok(parse_page(&body, video_id))
    }
}

/// Drive the pagination loop over a page-fetch function, stopping at
/// the item cap or the page cap, whichever comes first. An empty first
/// page is a provider error; an empty later page just ends the run.
async fn collect_comment_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<Comment>, SourceError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CommentPage, SourceError>>,
{
    let mut all_comments: Vec<Comment> = Vec::new();
    let mut next_page_token: Option<String> = None;
    let mut page_count = 0;

    loop {
        let page = fetch_page(next_page_token.take()).await?;

        if page.comments.is_empty() {
            if all_comments.is_empty() {
                return Err(SourceError::Provider(
                    "No comments found or the video might be private.".to_string(),
                ));
            }
            break;
        }

        all_comments.extend(page.comments);
        next_page_token = page.next_page_token;
        page_count += 1;

        if all_comments.len() >= MAX_COMMENTS
            || page_count >= MAX_PAGES
            || next_page_token.is_none()
        {
            break;
        }
    }

    Ok(all_comments)
}

fn parse_page(body: &Value, video_id: &str) -> CommentPage {
    let comments = body["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| map_comment_thread(item, video_id))
                .collect()
        })
        .unwrap_or_default();

    CommentPage {
        comments,
        next_page_token: body["nextPageToken"].as_str().map(|s| s.to_string()),
    }
}

/// Map one commentThreads item to a Comment, skipping items with
/// missing fields rather than failing the page.
fn map_comment_thread(item: &Value, video_id: &str) -> Option<Comment> {
    let snippet = &item["snippet"]["topLevelComment"]["snippet"];
    Some(Comment {
        comment_id: item["snippet"]["topLevelComment"]["id"].as_str()?.to_string(),
        video_id: video_id.to_string(),
        author: snippet["authorDisplayName"].as_str()?.to_string(),
        text: snippet["textDisplay"].as_str()?.to_string(),
        published_at: DateTime::parse_from_rfc3339(snippet["publishedAt"].as_str()?)
            .ok()?
            .with_timezone(&Utc),
        sentiment: None,
        analyzed_at: None,
    })
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_comments(&self, video_id: &str) -> Result<Vec<Comment>, SourceError> {
        self.fetch_latest_comments(video_id).await
    }
}
