use axum::{Router, extract::State, response::Json, routing::get};
use serde::Serialize;
use studio::album::ALBUM_TITLE;
use utils::response::ApiResponse;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/album", get(artist_album))
}

#[derive(Debug, Serialize)]
pub struct AlbumTrackLink {
    pub title: String,
    /// Public URL of the track
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistAlbumPage {
    pub album_title: String,
    pub album_art: Option<String>,
    pub album_tracks: Vec<AlbumTrackLink>,
    pub message: Option<String>,
}

/// The artist's own album, listed from the static album folder
async fn artist_album(State(state): State<AppState>) -> Json<ApiResponse<ArtistAlbumPage>> {
    let shared = state.studio.clone();
    let listing = match tokio::task::spawn_blocking(move || shared.album()).await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!("Album listing failed: {}", e);
            return Json(ApiResponse::success(ArtistAlbumPage {
                album_title: ALBUM_TITLE.to_string(),
                album_art: None,
                album_tracks: Vec::new(),
                message: Some("Server error loading album.".to_string()),
            }));
        }
    };

    let url_for = |file: &str| state.static_url.url(&state.studio.album_path(file));

    Json(ApiResponse::success(ArtistAlbumPage {
        album_title: listing.album_title,
        album_art: listing.art.as_deref().map(url_for),
        album_tracks: listing
            .tracks
            .iter()
            .map(|track| AlbumTrackLink {
                title: track.title.clone(),
                file: url_for(&track.file),
            })
            .collect(),
        message: listing.message,
    }))
}
