use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use timedtext::{fetch_transcript, Error, TimedTextClient, TranscriptLine, TranscriptOutcome};

/// Build the application router. All responses carry a permissive
/// cross-origin header.
pub fn router(client: TimedTextClient) -> Router {
    Router::new()
        .route("/transcript", get(get_transcript))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(client)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptResponse {
    video_id: String,
    has_captions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
    lines: Vec<TranscriptLine>,
}

/// GET /transcript?videoId=<id>&lang=<code|auto>
///
/// 200 with the normalized lines (even when all segments were blank),
/// 404 when the video has no caption tracks, 400 on a missing id,
/// 500 on any upstream or parse failure. Errors never propagate past
/// this handler.
async fn get_transcript(
    State(client): State<TimedTextClient>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    // Validate before any network call is made.
    let Some(video_id) = params.get("videoId").filter(|v| !v.is_empty()).cloned() else {
        return error_response(StatusCode::BAD_REQUEST, "Missing or invalid ?videoId");
    };
    let lang = params.get("lang").map(String::as_str).unwrap_or("auto");

    match fetch_transcript(&client, &video_id, lang).await {
        Ok(TranscriptOutcome::Captions { lang, lines }) => {
            info!(%video_id, %lang, line_count = lines.len(), "transcript served");
            json_response(
                StatusCode::OK,
                &TranscriptResponse {
                    video_id,
                    has_captions: true,
                    lang: Some(lang),
                    lines,
                },
            )
        }
        Ok(TranscriptOutcome::NoCaptions) => {
            info!(%video_id, "no caption tracks available");
            json_response(
                StatusCode::NOT_FOUND,
                &TranscriptResponse {
                    video_id,
                    has_captions: false,
                    lang: None,
                    lines: Vec::new(),
                },
            )
        }
        Err(Error::InvalidVideoId) => {
            error_response(StatusCode::BAD_REQUEST, "Missing or invalid ?videoId")
        }
        Err(err) => {
            error!(%video_id, error = %err, "transcript fetch failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    json_response(status, &json!({ "error": message }))
}

/// Serialize a body with an explicit utf-8 JSON content type.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let json = serde_json::to_string(body)
        .unwrap_or_else(|_| r#"{"error":"response serialization failed"}"#.to_string());
    (
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        json,
    )
        .into_response()
}
