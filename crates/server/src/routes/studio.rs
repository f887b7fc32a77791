//! AI Studio - turns a mood prompt into a local sample and background
//!
//! ```text
//! POST prompt  -->  Studio::generate  -->  { file, chosen_sample, background }
//! ```

use axum::{
    Form, Json, Router,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;

use crate::{error::ApiError, state::AppState};

pub fn router() -> Router<AppState> {
    let generate_route = || post(generate).fallback(method_not_allowed);

    Router::new()
        .route("/ai/api/generate/", generate_route())
        .route("/ai/api/generate", generate_route())
        .route("/ai/generate/", generate_route())
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    /// Public URL of the chosen sample
    pub file: String,
    /// The trimmed prompt as submitted
    pub mood: String,
    pub chosen_sample: String,
    /// Public URL of the background image
    pub background: String,
}

/// Body encodings the generate endpoint understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Multipart,
    Form,
}

fn body_kind(request: &Request) -> BodyKind {
    let media_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if media_type.eq_ignore_ascii_case("application/json") {
        BodyKind::Json
    } else if media_type.eq_ignore_ascii_case("multipart/form-data") {
        BodyKind::Multipart
    } else {
        BodyKind::Form
    }
}

async fn multipart_body(request: Request) -> Result<GenerateRequest, String> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| e.body_text())?;

    while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
        if field.name() == Some("prompt") {
            let prompt = field.text().await.map_err(|e| e.body_text())?;
            return Ok(GenerateRequest {
                prompt: Some(prompt),
            });
        }
    }
    Ok(GenerateRequest::default())
}

/// Accepts the prompt as a urlencoded form, a multipart form or JSON. A body
/// that parses as none of them carries no prompt.
async fn read_prompt(request: Request) -> String {
    let body = match body_kind(&request) {
        BodyKind::Json => match Bytes::from_request(request, &()).await {
            Ok(bytes) => {
                serde_json::from_slice::<GenerateRequest>(&bytes).map_err(|e| e.to_string())
            }
            Err(e) => Err(e.body_text()),
        },
        BodyKind::Multipart => multipart_body(request).await,
        BodyKind::Form => Form::<GenerateRequest>::from_request(request, &())
            .await
            .map(|Form(body)| body)
            .map_err(|e| e.body_text()),
    };

    match body {
        Ok(body) => body.prompt.unwrap_or_default(),
        Err(reason) => {
            tracing::debug!("Unreadable generate body: {}", reason);
            String::new()
        }
    }
}

/// Task failures are logged; the client only learns that generation failed
fn task_failed(err: JoinError) -> ApiError {
    tracing::error!("Generate task failed: {}", err);
    ApiError::InternalError("generate task failed".to_string())
}

pub async fn generate(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = read_prompt(request).await;

    let studio = state.studio.clone();
    let mut chooser = state.chooser();
    // Directory listings are blocking filesystem calls
    let generation = tokio::task::spawn_blocking(move || studio.generate(&prompt, &mut chooser))
        .await
        .map_err(task_failed)??;

    Ok(Json(GenerateResponse {
        success: true,
        file: state.static_url.url(&generation.sample_path),
        mood: generation.prompt,
        chosen_sample: generation.selection.chosen_sample,
        background: state.static_url.url(&generation.selection.background),
    }))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
