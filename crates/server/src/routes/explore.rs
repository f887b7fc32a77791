use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use catalog_client::{Category, Image, PlaylistSummary};
use serde::Serialize;
use utils::{assets::static_layout, response::ApiResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/explore", get(explore))
        .route("/explore/{genre_id}", get(explore_genre))
}

/// Genres shown when the catalog cannot be reached
const FALLBACK_GENRES: &[(&str, &str)] = &[
    ("pop", "Pop"),
    ("indie", "Indie"),
    ("lofi", "Lo-Fi"),
    ("jazz", "Jazz"),
];

#[derive(Debug, Serialize)]
pub struct ExplorePage {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct GenrePage {
    pub genre_id: String,
    pub playlists: Vec<PlaylistSummary>,
}

fn fallback_categories(state: &AppState) -> Vec<Category> {
    FALLBACK_GENRES
        .iter()
        .map(|(id, name)| Category {
            id: id.to_string(),
            name: name.to_string(),
            icons: vec![Image {
                url: Some(
                    state
                        .static_url
                        .url(&format!("{}/{}.jpg", static_layout::GENRE_ICONS_DIR, id)),
                ),
            }],
        })
        .collect()
}

async fn explore(State(state): State<AppState>) -> Json<ApiResponse<ExplorePage>> {
    let categories = match state.catalog.categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!("Falling back to built-in genres: {}", e);
            fallback_categories(&state)
        }
    };

    Json(ApiResponse::success(ExplorePage { categories }))
}

async fn explore_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<String>,
) -> Json<ApiResponse<GenrePage>> {
    let playlists = state
        .catalog
        .category_playlists(&genre_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("No playlists for genre '{}': {}", genre_id, e);
            Vec::new()
        });

    Json(ApiResponse::success(GenrePage {
        genre_id,
        playlists,
    }))
}
