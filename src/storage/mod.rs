mod client;
pub mod models;

pub use client::StorageClient;
pub use models::Comment;
