//! Catalog routes - search, album and artist pages backed by the remote catalog
//!
//! Search failures are shown inline on the page; album and artist lookups
//! fail the request with a gateway error.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use catalog_client::{ArtistDetail, TrackSummary};
use serde::{Deserialize, Serialize};
use utils::response::ApiResponse;

use crate::{error::ApiError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/album/{album_id}", get(album_detail))
        .route("/artist/{artist_id}", get(artist_detail))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub results: Option<Vec<TrackSummary>>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AlbumPage {
    pub album: serde_json::Value,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistPage {
    #[serde(flatten)]
    pub detail: ArtistDetail,
    pub query: String,
}

// ─── Search ───────────────────────────────────────────────────────────────

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<SearchPage>> {
    let query = params.q.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Json(ApiResponse::success(SearchPage {
            query,
            results: None,
            error: None,
        }));
    }

    if let Some(cached) = state.search_cache.get(&query).await {
        tracing::debug!("Search cache hit for '{}'", query);
        return Json(ApiResponse::success(SearchPage {
            query,
            results: Some(cached.as_ref().clone()),
            error: None,
        }));
    }

    let page = match state.catalog.search_tracks(&query, None).await {
        Ok(tracks) => {
            let tracks = state.search_cache.put(&query, tracks).await;
            SearchPage {
                query,
                results: Some(tracks.as_ref().clone()),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Catalog search for '{}' failed: {}", query, e);
            SearchPage {
                query,
                results: None,
                error: Some(e.to_string()),
            }
        }
    };

    Json(ApiResponse::success(page))
}

// ─── Albums & Artists ─────────────────────────────────────────────────────

async fn album_detail(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<AlbumPage>>, ApiError> {
    let album = state.catalog.album(&album_id).await?;

    Ok(Json(ApiResponse::success(AlbumPage {
        album,
        query: params.q.unwrap_or_default(),
    })))
}

async fn artist_detail(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<ArtistPage>>, ApiError> {
    let detail = state.catalog.artist(&artist_id).await?;

    Ok(Json(ApiResponse::success(ArtistPage {
        detail,
        query: params.q.unwrap_or_default(),
    })))
}
