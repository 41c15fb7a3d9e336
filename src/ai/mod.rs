mod models;
mod client;
mod gemini;
mod openai;

pub use models::{AIProvider, AIError};
pub use client::AIClient;
