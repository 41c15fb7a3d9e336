use warp::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Filter, Rejection};
use std::convert::Infallible;
use std::sync::Arc;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use crate::analysis::{AnalysisError, SentimentPipeline};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "videoUrl")]
    pub video_url: String,
}

pub fn api_routes(
    pipeline: Arc<SentimentPipeline>,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    warp::path("api")
        .and(analyze(pipeline).or(health()))
        .recover(handle_rejection)
}

/// Turn rejections into the same structured `{"error": …}` JSON the
/// handlers produce, so a missing `videoUrl` or malformed body never
/// surfaces as a plain-text reply.
async fn handle_rejection(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&json!({"error": message})),
        status,
    ))
}

pub fn with_pipeline(
    pipeline: Arc<SentimentPipeline>,
) -> impl Filter<Extract = (Arc<SentimentPipeline>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}

fn analyze(
    pipeline: Arc<SentimentPipeline>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("analyze")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_pipeline(pipeline))
        .and_then(handle_analyze)
}

fn health() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({"status": "ok"})))
}

async fn handle_analyze(
    request: AnalyzeRequest,
    pipeline: Arc<SentimentPipeline>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match pipeline.analyze_video(&request.video_url).await {
        Ok(report) => {
            info!(
                "Analysis complete: {} comments, {:.1}% positive",
                report.total_comments, report.positive
            );
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({
                    "positive": format!("{:.1}", report.positive),
                    "negative": format!("{:.1}", report.negative),
                    "neutral": format!("{:.1}", report.neutral),
                    "totalComments": report.total_comments,
                })),
                StatusCode::OK,
            ))
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            let status = match &e {
                AnalysisError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                AnalysisError::NoCommentsFound(_) => StatusCode::NOT_FOUND,
                AnalysisError::AnalysisFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AnalysisError::Retrieval(_) | AnalysisError::Persistence(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({"error": e.to_string()})),
                status,
            ))
        }
    }
}
