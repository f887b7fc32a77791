use axum::{
    Router,
    http::{Method, Uri},
    middleware,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{error::ApiError, middleware as app_middleware, state::AppState};

pub mod album;
pub mod catalog;
pub mod explore;
pub mod health;
pub mod studio;

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(catalog::router())
        .merge(explore::router())
        .merge(album::router());

    let routes = Router::new()
        .route("/health", get(health::health_check))
        .merge(studio::router())
        .nest("/api", api_routes);

    let static_files = ServeDir::new(&state.static_root);
    let routes = match state.static_url.mount_path() {
        Some("/") => routes.fallback_service(static_files),
        Some(mount) => routes.nest_service(mount, static_files).fallback(not_found),
        None => routes.fallback(not_found),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    routes
        .layer(middleware::from_fn(app_middleware::access_log))
        .layer(cors)
        .with_state(state)
}
