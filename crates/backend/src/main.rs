use axum::{
    http::{header, HeaderName, Method, StatusCode},
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod db;
pub mod error;
mod handlers;
mod models;
mod notify;
mod schema;
mod services;

use crate::auth::AdminConfig;
use crate::db::DbPool;
use crate::notify::RoomHub;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub hub: Arc<RoomHub>,
    pub admin: AdminConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    // Establish database connection pool
    let pool = db::establish_connection_pool()?;

    let state = AppState {
        pool,
        hub: Arc::new(RoomHub::new()),
        admin: AdminConfig::from_env(),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        // Admin routes
        .route("/api/admin/verify", post(handlers::verify_password))
        // Room routes
        .route("/api/rooms", get(handlers::list_rooms))
        .route("/api/rooms", post(handlers::create_room))
        .route("/api/rooms/:id", get(handlers::get_room))
        .route("/api/rooms/:id", delete(handlers::delete_room))
        // Selection routes
        .route("/api/rooms/:id/selections", get(handlers::list_selections))
        .route(
            "/api/rooms/:id/selections/toggle",
            post(handlers::toggle_selection),
        )
        .route("/api/rooms/:id/overview", get(handlers::room_overview))
        // Change feed
        .route("/api/rooms/:id/events", get(handlers::room_events))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
        .with_state(state);

    // Serve static frontend files if the directory exists
    let frontend_dir =
        std::env::var("FRONTEND_DIR").unwrap_or_else(|_| "crates/frontend/dist".to_string());
    let app = if std::path::Path::new(&frontend_dir).exists() {
        tracing::info!("Serving frontend from {}", frontend_dir);
        let index_path = format!("{}/index.html", frontend_dir);
        let serve_dir = ServeDir::new(&frontend_dir).not_found_service(ServeFile::new(&index_path));
        app.fallback_service(serve_dir)
    } else {
        tracing::info!(
            "Frontend directory not found at {}, serving API only",
            frontend_dir
        );
        app
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Build CORS layer based on environment configuration.
///
/// If CORS_ALLOWED_ORIGINS is set, only those origins are allowed.
/// If not set, defaults to permissive CORS (for development only).
fn build_cors_layer() -> CorsLayer {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS").ok();

    match allowed_origins {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                tracing::warn!(
                    "CORS_ALLOWED_ORIGINS is set but empty, using permissive CORS (not recommended for production)"
                );
                CorsLayer::permissive()
            } else {
                tracing::info!("CORS configured for origins: {:?}", origins);
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                    .allow_headers([
                        header::CONTENT_TYPE,
                        HeaderName::from_static(auth::ADMIN_PASSWORD_HEADER),
                    ])
            }
        }
        None => {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS not set, using permissive CORS (not recommended for production)"
            );
            CorsLayer::permissive()
        }
    }
}
