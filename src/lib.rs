pub mod config;
pub mod logging;
pub mod storage;
pub mod youtube;
pub mod ai;
pub mod analysis;
pub mod web_ui;

use std::sync::Arc;
use log::info;
use tokio::sync::RwLock;

use crate::ai::AIClient;
use crate::analysis::SentimentPipeline;
use crate::config::Config;
use crate::storage::StorageClient;
use crate::web_ui::WebUI;
use crate::youtube::YouTubeClient;

/// The external collaborators, initialized once and passed by
/// reference into the pipeline.
pub struct AppClients {
    pub storage: Arc<StorageClient>,
    pub youtube: Arc<YouTubeClient>,
    pub ai: Arc<AIClient>,
}

pub async fn init(
    config: Arc<RwLock<Config>>,
) -> Result<AppClients, Box<dyn std::error::Error + Send + Sync>> {
    let config_read = config.read().await;

    let youtube_api_key = config_read
        .youtube_api_key
        .clone()
        .ok_or("YouTube API key not set (set YOUTUBE_API_KEY or add it to sentitube.conf)")?;

    let ai = AIClient::new(
        config_read.gemini_api_key.clone(),
        config_read.openai_api_key.clone(),
    );
    if !ai.has_provider() {
        return Err("No classifier configured (set GEMINI_API_KEY or OPENAI_API_KEY)".into());
    }

    let database_path = config_read.database_path();
    drop(config_read);

    let storage = StorageClient::new(&database_path)?;
    info!("Storage initialized at {}", database_path);

    Ok(AppClients {
        storage: Arc::new(storage),
        youtube: Arc::new(YouTubeClient::new(youtube_api_key)),
        ai: Arc::new(ai),
    })
}

pub async fn run(
    clients: AppClients,
    config: Arc<RwLock<Config>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let pipeline = Arc::new(SentimentPipeline::new(
        clients.storage,
        clients.youtube,
        clients.ai,
    ));
    let web_ui = WebUI::new(config, pipeline);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
        }
        info!("Received Ctrl+C, shutting down.");
    };

    info!("SentiTube is running. Press Ctrl+C to exit.");
    web_ui.run(shutdown_signal).await?;

    info!("SentiTube has shut down.");
    Ok(())
}
