//! Catalog Client - HTTP client for the Spotify Web API
//!
//! Every operation first trades the app's client credentials for a bearer
//! token, then calls the catalog with it:
//! - Track search, flattened into display records
//! - Album and artist lookups (passed through as raw JSON)
//! - Browse categories and the playlists of one category

use std::time::Duration;

use base64::Engine;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub mod types;
pub use types::*;

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CLIENT_ID_ENV: &str = "SPOTIFY_CLIENT_ID";
const CLIENT_SECRET_ENV: &str = "SPOTIFY_CLIENT_SECRET";

/// Error types for catalog client operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogClientError {
    #[error("Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET in environment.")]
    MissingCredentials,
    #[error("Catalog service not reachable: {0}")]
    NotReachable(String),
    #[error("Catalog request timed out")]
    Timeout,
    #[error("Catalog API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Failed to parse catalog response: {0}")]
    ParseError(String),
    #[error("Catalog token response did not include an access token")]
    MissingToken,
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for CatalogClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogClientError::Timeout
        } else if err.is_decode() {
            CatalogClientError::ParseError(err.to_string())
        } else {
            CatalogClientError::NotReachable(err.to_string())
        }
    }
}

/// App credentials for the client-credentials grant
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// `None` makes every call fail with `MissingCredentials`
    pub credentials: Option<Credentials>,
    pub token_url: String,
    pub api_base: String,
    pub timeout: Duration,
    /// Market used for artist top tracks
    pub market: String,
    /// Country used for browse categories
    pub country: String,
    pub search_limit: u32,
    pub category_limit: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            market: "US".to_string(),
            country: "US".to_string(),
            search_limit: 12,
            category_limit: 12,
        }
    }
}

impl CatalogConfig {
    /// Default endpoints with credentials read from `SPOTIFY_CLIENT_ID` /
    /// `SPOTIFY_CLIENT_SECRET`; blank values count as missing
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let credentials = match (non_empty(CLIENT_ID_ENV), non_empty(CLIENT_SECRET_ENV)) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            _ => {
                warn!("Catalog credentials not set - search and browse will report errors");
                None
            }
        };

        Self {
            credentials,
            ..Self::default()
        }
    }
}

/// Client for the catalog API
#[derive(Clone)]
pub struct CatalogClient {
    config: CatalogConfig,
    client: Client,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogClientError::NotReachable(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn has_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    // ─── Auth ─────────────────────────────────────────────────────────────

    /// Exchange the client credentials for a bearer token
    pub async fn access_token(&self) -> Result<String, CatalogClientError> {
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or(CatalogClientError::MissingCredentials)?;

        let basic = base64::engine::general_purpose::STANDARD.encode(format!(
            "{}:{}",
            credentials.client_id, credentials.client_secret
        ));

        let resp = self
            .client
            .post(&self.config.token_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", basic))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let token: TokenResponse = parse_json(resp).await?;
        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(CatalogClientError::MissingToken)
    }

    // ─── Search ───────────────────────────────────────────────────────────

    /// Search tracks and flatten each hit into a `TrackSummary`
    pub async fn search_tracks(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<Vec<TrackSummary>, CatalogClientError> {
        let token = self.access_token().await?;
        let limit = limit.unwrap_or(self.config.search_limit).clamp(1, 50);

        let url = self.endpoint(&["search"])?;
        let req = self.client.get(url).query(&[
            ("q", query.to_string()),
            ("type", "track".to_string()),
            ("limit", limit.to_string()),
        ]);
        let envelope: SearchEnvelope = self.send_json(req, &token).await?;

        let tracks: Vec<TrackSummary> = envelope
            .tracks
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .map(TrackSummary::from)
            .collect();
        debug!("Catalog search '{}' returned {} tracks", query, tracks.len());
        Ok(tracks)
    }

    // ─── Albums & Artists ─────────────────────────────────────────────────

    pub async fn album(&self, album_id: &str) -> Result<serde_json::Value, CatalogClientError> {
        let token = self.access_token().await?;
        let url = self.endpoint(&["albums", album_id])?;
        self.send_json(self.client.get(url), &token).await
    }

    /// Artist profile and top tracks in the configured market
    pub async fn artist(&self, artist_id: &str) -> Result<ArtistDetail, CatalogClientError> {
        let token = self.access_token().await?;

        let artist_url = self.endpoint(&["artists", artist_id])?;
        let top_url = self.endpoint(&["artists", artist_id, "top-tracks"])?;

        let artist: serde_json::Value = self.send_json(self.client.get(artist_url), &token).await?;
        let top: TopTracksEnvelope = self
            .send_json(
                self.client
                    .get(top_url)
                    .query(&[("market", self.config.market.as_str())]),
                &token,
            )
            .await?;

        Ok(ArtistDetail {
            artist,
            top_tracks: top.tracks,
        })
    }

    // ─── Browse ───────────────────────────────────────────────────────────

    pub async fn categories(&self) -> Result<Vec<Category>, CatalogClientError> {
        let token = self.access_token().await?;
        let url = self.endpoint(&["browse", "categories"])?;
        let req = self.client.get(url).query(&[
            ("country", self.config.country.clone()),
            ("limit", self.config.category_limit.to_string()),
        ]);
        let envelope: CategoriesEnvelope = self.send_json(req, &token).await?;

        Ok(envelope
            .categories
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .collect())
    }

    pub async fn category_playlists(
        &self,
        category_id: &str,
    ) -> Result<Vec<PlaylistSummary>, CatalogClientError> {
        let token = self.access_token().await?;
        let url = self.endpoint(&["browse", "categories", category_id, "playlists"])?;
        let envelope: PlaylistsEnvelope = self.send_json(self.client.get(url), &token).await?;

        Ok(envelope
            .playlists
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .map(PlaylistSummary::from)
            .collect())
    }

    // ─── Plumbing ─────────────────────────────────────────────────────────

    /// API base joined with percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogClientError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| CatalogClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| CatalogClientError::InvalidUrl(self.config.api_base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        token: &str,
    ) -> Result<T, CatalogClientError> {
        let resp = req.bearer_auth(token).send().await?;
        parse_json(resp).await
    }
}

/// Decode a 2xx body, or turn the error body into `CatalogClientError::Api`
async fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T, CatalogClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(CatalogClientError::Api {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            }),
        });
    }

    resp.json()
        .await
        .map_err(|e| CatalogClientError::ParseError(e.to_string()))
}

/// Pull a message out of either error shape the API uses:
/// `{"error": {"message": ..}}` or `{"error": .., "error_description": ..}`
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["error"]["message"]
        .as_str()
        .or_else(|| value["error_description"].as_str())
        .or_else(|| value["error"].as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{
        Json, Router,
        extract::{Form, Path, Query},
        http::{HeaderMap, StatusCode},
        routing::{get, post},
    };
    use serde_json::json;

    use super::*;

    const TOKEN: &str = "test-token";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {TOKEN}"))
            .unwrap_or(false)
    }

    async fn token(
        headers: HeaderMap,
        Form(form): Form<std::collections::HashMap<String, String>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        // base64("id:secret")
        let expected = "Basic aWQ6c2VjcmV0";
        let basic_ok = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == expected)
            .unwrap_or(false);
        if !basic_ok || form.get("grant_type").map(String::as_str) != Some("client_credentials") {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid_client", "error_description": "Invalid client"})),
            );
        }
        (StatusCode::OK, Json(json!({"access_token": TOKEN, "expires_in": 3600})))
    }

    async fn search(
        headers: HeaderMap,
        Query(params): Query<std::collections::HashMap<String, String>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if !authorized(&headers) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
            );
        }
        let q = params.get("q").cloned().unwrap_or_default();
        (
            StatusCode::OK,
            Json(json!({"tracks": {"items": [{
                "name": q,
                "artists": [{"id": "a1", "name": "Echo"}],
                "album": {"id": "al1", "name": "Rooms", "images": []},
                "preview_url": null,
                "external_urls": {"spotify": "https://open.spotify.com/track/t1"}
            }]}})),
        )
    }

    async fn album(Path(id): Path<String>) -> (StatusCode, Json<serde_json::Value>) {
        if id == "missing" {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"error": {"status": 404, "message": "Non existing id"}})),
            );
        }
        (StatusCode::OK, Json(json!({"id": id, "name": "Rooms"})))
    }

    async fn top_tracks(
        Path(id): Path<String>,
        Query(params): Query<std::collections::HashMap<String, String>>,
    ) -> Json<serde_json::Value> {
        Json(json!({"tracks": [{"name": format!("{id}-hit"), "market": params.get("market")}]}))
    }

    async fn category_playlists(
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if !authorized(&headers) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({"playlists": {"items": [
                null,
                {
                    "name": format!("{id} mix"),
                    "images": [{"url": "https://i/mix.jpg"}, {"url": "https://i/mix-small.jpg"}],
                    "external_urls": {"spotify": "https://open.spotify.com/playlist/p1"}
                }
            ]}})),
        )
    }

    async fn start_catalog() -> SocketAddr {
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/search", get(search))
            .route("/v1/albums/{id}", get(album))
            .route("/v1/artists/{id}", get(|Path(id): Path<String>| async move {
                Json(json!({"id": id, "name": "Echo"}))
            }))
            .route("/v1/artists/{id}/top-tracks", get(top_tracks))
            .route(
                "/v1/browse/categories",
                get(|| async {
                    Json(json!({"categories": {"items": [
                        {"id": "chill", "name": "Chill", "icons": [{"url": "https://i/chill.jpg"}]}
                    ]}}))
                }),
            )
            .route(
                "/v1/browse/categories/{id}/playlists",
                get(category_playlists),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr, secret: &str) -> CatalogClient {
        CatalogClient::new(CatalogConfig {
            credentials: Some(Credentials {
                client_id: "id".to_string(),
                client_secret: secret.to_string(),
            }),
            token_url: format!("http://{addr}/api/token"),
            api_base: format!("http://{addr}/v1"),
            timeout: Duration::from_secs(5),
            ..CatalogConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_without_network() {
        let client = CatalogClient::new(CatalogConfig {
            token_url: "http://127.0.0.1:9/unused".to_string(),
            ..CatalogConfig::default()
        })
        .unwrap();
        let err = client.search_tracks("anything", None).await.unwrap_err();
        assert!(matches!(err, CatalogClientError::MissingCredentials));
        assert_eq!(
            err.to_string(),
            "Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET in environment."
        );
    }

    #[tokio::test]
    async fn test_search_exchanges_token_and_flattens() {
        let addr = start_catalog().await;
        let client = client_for(addr, "secret");

        let tracks = client.search_tracks("night drive", None).await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name.as_deref(), Some("night drive"));
        assert_eq!(tracks[0].artists, "Echo");
        assert_eq!(tracks[0].album_id.as_deref(), Some("al1"));
        assert_eq!(tracks[0].album_image, None);
    }

    #[tokio::test]
    async fn test_rejected_credentials_surface_api_error() {
        let addr = start_catalog().await;
        let client = client_for(addr, "wrong");

        match client.search_tracks("x", None).await {
            Err(CatalogClientError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid client");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_album_not_found() {
        let addr = start_catalog().await;
        let client = client_for(addr, "secret");

        let album = client.album("al1").await.unwrap();
        assert_eq!(album["name"], "Rooms");

        match client.album("missing").await {
            Err(CatalogClientError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Non existing id");
            }
            other => panic!("expected 404, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_artist_with_top_tracks() {
        let addr = start_catalog().await;
        let client = client_for(addr, "secret");

        let detail = client.artist("a1").await.unwrap();
        assert_eq!(detail.artist["name"], "Echo");
        assert_eq!(detail.top_tracks.len(), 1);
        assert_eq!(detail.top_tracks[0]["name"], "a1-hit");
        assert_eq!(detail.top_tracks[0]["market"], "US");
    }

    #[tokio::test]
    async fn test_categories() {
        let addr = start_catalog().await;
        let client = client_for(addr, "secret");

        let categories = client.categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "chill");
        assert_eq!(categories[0].icons[0].url.as_deref(), Some("https://i/chill.jpg"));
    }

    #[tokio::test]
    async fn test_category_playlists() {
        let addr = start_catalog().await;
        let client = client_for(addr, "secret");

        let playlists = client.category_playlists("chill").await.unwrap();
        assert_eq!(
            playlists,
            vec![PlaylistSummary {
                name: Some("chill mix".to_string()),
                image: Some("https://i/mix.jpg".to_string()),
                spotify_url: Some("https://open.spotify.com/playlist/p1".to_string()),
            }]
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = CatalogClient::new(CatalogConfig::default()).unwrap();
        let url = client.endpoint(&["albums", "a/b?c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.spotify.com/v1/albums/a%2Fb%3Fc");
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"error":{"status":401,"message":"The access token expired"}}"#),
            Some("The access token expired".to_string())
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#),
            Some("Invalid client secret".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }
}
