mod client;
mod models;

pub use client::{YouTubeClient, MAX_COMMENTS, MAX_PAGES};
pub use models::SourceError;
