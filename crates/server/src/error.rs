use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_client::CatalogClientError;
use serde::Serialize;
use studio::StudioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Studio(#[from] StudioError),
    #[error(transparent)]
    Catalog(#[from] CatalogClientError),
    #[error("Only POST allowed")]
    MethodNotAllowed,
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

/// Error payload: a short message, plus details for server-side faults
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    fn short(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn detailed(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Studio(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Studio(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Catalog(CatalogClientError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Catalog(_) => StatusCode::BAD_GATEWAY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body; never carries filesystem paths
    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Studio(e) => match e {
                StudioError::EmptyPrompt => ErrorBody::short("Missing prompt"),
                StudioError::SamplesDirMissing(_) => ErrorBody::detailed(
                    "Server misconfiguration: samples directory missing.",
                    "samples directory missing",
                ),
                StudioError::SamplesDirUnreadable { .. } => ErrorBody::detailed(
                    "Server misconfiguration: samples directory unreadable.",
                    "samples directory unreadable",
                ),
                StudioError::NoSamples(_) => ErrorBody::detailed(
                    "No sample audio files on server.",
                    "no audio samples found",
                ),
            },
            ApiError::Catalog(e) => ErrorBody::short(e.to_string()),
            ApiError::NotFound(msg) => ErrorBody::short(msg.clone()),
            ApiError::MethodNotAllowed => ErrorBody::short(self.to_string()),
            ApiError::InternalError(details) => {
                ErrorBody::detailed("Internal server error", details.clone())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status_code, Json(self.body())).into_response()
    }
}
