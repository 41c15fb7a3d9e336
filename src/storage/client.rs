use rusqlite::{params, Connection, Result};
use crate::analysis::{BoxError, CommentStore, Sentiment};
use crate::storage::models::Comment;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;

pub struct StorageClient {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl StorageClient {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Open a new connection (this will create a new file)
        let conn = Connection::open(&path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS comments (
                comment_id TEXT PRIMARY KEY,
                video_id TEXT NOT NULL,
                author TEXT NOT NULL,
                text TEXT NOT NULL,
                published_at INTEGER NOT NULL,
                sentiment TEXT,
                analyzed_at INTEGER
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_comments_video ON comments(video_id)",
            [],
        )?;

        info!("Database schema created or updated successfully");

        Ok(StorageClient {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn find_by_video(&self, video_id: &str) -> Result<Vec<Comment>> {
        let query = "SELECT comment_id, author, text, published_at, sentiment, analyzed_at
                     FROM comments WHERE video_id = ?1 ORDER BY published_at DESC";

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(query)?;
        let rows = stmt.query_map([video_id], |row| {
            Ok(Comment {
                comment_id: row.get(0)?,
                video_id: video_id.to_string(),
                author: row.get(1)?,
                text: row.get(2)?,
                published_at: DateTime::from_timestamp(row.get::<_, i64>(3)?, 0)
                    .unwrap_or_else(Utc::now),
                sentiment: row
                    .get::<_, Option<String>>(4)?
                    .and_then(|s| Sentiment::from_str(&s).ok()),
                analyzed_at: row
                    .get::<_, Option<i64>>(5)?
                    .and_then(|t| DateTime::from_timestamp(t, 0)),
            })
        })?;

        rows.collect()
    }

    /// The stored sentiment string for a comment, if any. A row without
    /// a label and a missing row both come back as `None`.
    pub fn find_sentiment(&self, comment_id: &str) -> Result<Option<String>> {
        let query = "SELECT sentiment FROM comments WHERE comment_id = ?1";

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(query)?;
        let result = stmt.query_row([comment_id], |row| row.get::<_, Option<String>>(0));
        match result {
            Ok(sentiment) => Ok(sentiment),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Bulk insert with `INSERT OR IGNORE`: a duplicate comment_id is
    /// skipped without touching the existing row (or its label).
    /// Returns the number of rows actually inserted.
    pub fn insert_many(&self, comments: &[Comment]) -> Result<usize> {
        let query = "INSERT OR IGNORE INTO comments (comment_id, video_id, author, text, published_at, sentiment, analyzed_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

        let conn = self.conn.lock().unwrap();
        let mut inserted = 0;
        for comment in comments {
            let mut stmt = conn.prepare_cached(query)?;
            inserted += stmt.execute(params![
                comment.comment_id,
                comment.video_id,
                comment.author,
                comment.text,
                comment.published_at.timestamp(),
                comment.sentiment.map(|s| s.to_string()),
                comment.analyzed_at.map(|t| t.timestamp()),
            ])?;
        }

        Ok(inserted)
    }

    pub fn set_sentiment(
        &self,
        comment_id: &str,
        sentiment: Sentiment,
        analyzed_at: DateTime<Utc>,
    ) -> Result<()> {
        let query = "UPDATE comments SET sentiment = ?2, analyzed_at = ?3 WHERE comment_id = ?1";

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(query)?;
        stmt.execute(params![comment_id, sentiment.to_string(), analyzed_at.timestamp()])?;

        Ok(())
    }
}

#[async_trait]
impl CommentStore for StorageClient {
    async fn comments_for_video(&self, video_id: &str) -> Result<Vec<Comment>, BoxError> {
        Ok(self.find_by_video(video_id)?)
    }

    async fn cached_sentiment(&self, comment_id: &str) -> Result<Option<String>, BoxError> {
        Ok(self.find_sentiment(comment_id)?)
    }

    async fn insert_comments(&self, comments: &[Comment]) -> Result<usize, BoxError> {
        Ok(self.insert_many(comments)?)
    }

    async fn update_sentiment(
        &self,
        comment_id: &str,
        sentiment: Sentiment,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), BoxError> {
        Ok(self.set_sentiment(comment_id, sentiment, analyzed_at)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> (StorageClient, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let client = StorageClient::new(dir.path().join("comments.db")).unwrap();
        (client, dir)
    }

    fn comment(id: &str, video_id: &str) -> Comment {
        Comment {
            comment_id: id.to_string(),
            video_id: video_id.to_string(),
            author: "author".to_string(),
            text: "some text".to_string(),
            published_at: Utc::now(),
            sentiment: None,
            analyzed_at: None,
        }
    }

    #[test]
    fn insert_and_find_round_trip() {
        let (storage, _dir) = client();
        let inserted = storage
            .insert_many(&[comment("c1", "vid1"), comment("c2", "vid1"), comment("c3", "vid2")])
            .unwrap();
        assert_eq!(inserted, 3);

        let found = storage.find_by_video("vid1").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|c| c.video_id == "vid1" && !c.is_analyzed()));
    }

    #[test]
    fn duplicate_identity_is_ignored_not_overwritten() {
        let (storage, _dir) = client();
        storage.insert_many(&[comment("c1", "vid1")]).unwrap();
        storage
            .set_sentiment("c1", Sentiment::Positive, Utc::now())
            .unwrap();

        // Re-inserting the same identity must not clobber the label.
        let inserted = storage.insert_many(&[comment("c1", "vid1")]).unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(storage.find_sentiment("c1").unwrap(), Some("positive".to_string()));
    }

    #[test]
    fn missing_and_unlabeled_comments_both_read_as_none() {
        let (storage, _dir) = client();
        storage.insert_many(&[comment("c1", "vid1")]).unwrap();

        assert_eq!(storage.find_sentiment("c1").unwrap(), None);
        assert_eq!(storage.find_sentiment("nope").unwrap(), None);
    }

    #[test]
    fn updated_sentiment_is_read_back_on_the_comment() {
        let (storage, _dir) = client();
        storage.insert_many(&[comment("c1", "vid1")]).unwrap();
        storage
            .set_sentiment("c1", Sentiment::Neutral, Utc::now())
            .unwrap();

        let found = storage.find_by_video("vid1").unwrap();
        assert_eq!(found[0].sentiment, Some(Sentiment::Neutral));
        assert!(found[0].analyzed_at.is_some());
    }
}
