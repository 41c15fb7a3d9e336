use std::future::Future;
use std::sync::Arc;
use log::info;
use tokio::sync::RwLock;
use warp::Filter;
use crate::analysis::SentimentPipeline;
use crate::config::Config;
use super::api_routes::api_routes;

pub struct WebUI {
    config: Arc<RwLock<Config>>,
    pipeline: Arc<SentimentPipeline>,
}

impl WebUI {
    pub fn new(config: Arc<RwLock<Config>>, pipeline: Arc<SentimentPipeline>) -> Self {
        WebUI { config, pipeline }
    }

    pub async fn run(
        &self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let config_read = self.config.read().await;
        let host = config_read.web_host.clone().unwrap_or_else(|| "127.0.0.1".to_string());
        let port = config_read.web_port.unwrap_or(3000);
        let frontend_url = config_read.frontend_url.clone();
        drop(config_read);

        // Lock CORS to the configured frontend, or stay open when none
        // is configured (local development).
        let cors = match &frontend_url {
            Some(origin) => warp::cors()
                .allow_origin(origin.as_str())
                .allow_methods(vec!["GET", "POST"])
                .allow_headers(vec!["content-type"]),
            None => warp::cors()
                .allow_any_origin()
                .allow_methods(vec!["GET", "POST"])
                .allow_headers(vec!["content-type"]),
        };

        let routes = api_routes(self.pipeline.clone())
            .with(cors)
            .with(warp::log::custom(move |info| {
                info!(
                    "Request: {} {} {}",
                    info.method(),
                    info.path(),
                    info.status().as_u16()
                );
            }));

        let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
        info!("Starting web server on {}:{}", host, port);

        let (_, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, shutdown_signal);

        // Run the server in a separate task and wait for it to complete
        // (this happens when shutdown_signal is triggered).
        let server_handle = tokio::spawn(server);
        server_handle.await?;

        info!("Web server stopped");
        Ok(())
    }
}
