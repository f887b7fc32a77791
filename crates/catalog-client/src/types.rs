//! Response types for the catalog API

use serde::{Deserialize, Serialize};

/// Client-credentials token response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Image {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Track object as returned inside search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

/// A page of items; the API may return `null` entries
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<T>>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub tracks: Option<Paging<TrackObject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesEnvelope {
    #[serde(default)]
    pub categories: Option<Paging<Category>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistsEnvelope {
    #[serde(default)]
    pub playlists: Option<Paging<PlaylistObject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopTracksEnvelope {
    #[serde(default)]
    pub tracks: Vec<serde_json::Value>,
}

/// Flattened search hit, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackSummary {
    pub name: Option<String>,
    /// Artist names joined with `", "`
    pub artists: String,
    /// Id of the first credited artist
    pub artist_id: Option<String>,
    pub album_name: Option<String>,
    pub album_id: Option<String>,
    pub album_image: Option<String>,
    pub preview_url: Option<String>,
    pub spotify_url: Option<String>,
}

impl From<TrackObject> for TrackSummary {
    fn from(track: TrackObject) -> Self {
        let artists = track
            .artists
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect::<Vec<_>>()
            .join(", ");
        let artist_id = track.artists.first().and_then(|a| a.id.clone());
        let album = track.album.unwrap_or_default();

        Self {
            name: track.name,
            artists,
            artist_id,
            album_name: album.name,
            album_id: album.id,
            album_image: album.images.into_iter().next().and_then(|i| i.url),
            preview_url: track.preview_url,
            spotify_url: track.external_urls.and_then(|u| u.spotify),
        }
    }
}

/// Browse category (genre)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icons: Vec<Image>,
}

/// Flattened playlist entry for a category page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaylistSummary {
    pub name: Option<String>,
    pub image: Option<String>,
    pub spotify_url: Option<String>,
}

impl From<PlaylistObject> for PlaylistSummary {
    fn from(playlist: PlaylistObject) -> Self {
        Self {
            name: playlist.name,
            image: playlist
                .images
                .unwrap_or_default()
                .into_iter()
                .next()
                .and_then(|i| i.url),
            spotify_url: playlist.external_urls.and_then(|u| u.spotify),
        }
    }
}

/// Artist profile plus their top tracks, both passed through untouched
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub artist: serde_json::Value,
    pub top_tracks: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_summary_flattens_search_item() {
        let item: TrackObject = serde_json::from_value(serde_json::json!({
            "name": "Midnight City",
            "artists": [
                {"id": "63MQldklfxkjYDoUE4Tppz", "name": "M83"},
                {"id": "x", "name": "Guest"}
            ],
            "album": {
                "id": "alb1",
                "name": "Hurry Up, We're Dreaming",
                "images": [{"url": "https://i.scdn.co/large.jpg"}, {"url": "https://i.scdn.co/small.jpg"}]
            },
            "preview_url": null,
            "external_urls": {"spotify": "https://open.spotify.com/track/1"}
        }))
        .unwrap();

        let summary = TrackSummary::from(item);
        assert_eq!(summary.name.as_deref(), Some("Midnight City"));
        assert_eq!(summary.artists, "M83, Guest");
        assert_eq!(summary.artist_id.as_deref(), Some("63MQldklfxkjYDoUE4Tppz"));
        assert_eq!(summary.album_name.as_deref(), Some("Hurry Up, We're Dreaming"));
        assert_eq!(summary.album_image.as_deref(), Some("https://i.scdn.co/large.jpg"));
        assert_eq!(summary.preview_url, None);
        assert_eq!(
            summary.spotify_url.as_deref(),
            Some("https://open.spotify.com/track/1")
        );
    }

    #[test]
    fn test_track_summary_tolerates_sparse_item() {
        let item: TrackObject = serde_json::from_value(serde_json::json!({"name": "Solo"})).unwrap();
        let summary = TrackSummary::from(item);
        assert_eq!(summary.artists, "");
        assert_eq!(summary.artist_id, None);
        assert_eq!(summary.album_image, None);
    }

    #[test]
    fn test_playlists_skip_null_items() {
        let envelope: PlaylistsEnvelope = serde_json::from_value(serde_json::json!({
            "playlists": {"items": [
                null,
                {"name": "Lo-Fi Beats", "images": null, "external_urls": {"spotify": "https://open.spotify.com/playlist/1"}}
            ]}
        }))
        .unwrap();

        let playlists: Vec<PlaylistSummary> = envelope
            .playlists
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .map(PlaylistSummary::from)
            .collect();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name.as_deref(), Some("Lo-Fi Beats"));
        assert_eq!(playlists[0].image, None);
    }
}
