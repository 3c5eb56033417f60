//! # HTTP Server
//!
//! Builds the dependency graph once at startup and combines the route
//! groups. The blob client and registry are constructed here and injected
//! into the service as explicit dependencies.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::auth::{JwtConfig, JwtManager};
use crate::blob_store::LocalBlobStore;
use crate::papers::PaperService;
use crate::registry::DocumentRegistry;

use super::admin_routes::admin_routes;
use super::config::ServerConfig;
use super::home_routes::home_routes;
use super::paper_routes::paper_routes;
use super::user_routes::user_routes;

/// Shared state across all handlers
pub struct AppState {
    pub papers: PaperService,
    pub jwt: JwtManager,
}

impl AppState {
    /// Wire the service graph from configuration
    pub fn from_config(config: &ServerConfig) -> Self {
        let registry = Arc::new(DocumentRegistry::new());
        let blob_store = Arc::new(LocalBlobStore::new(
            config.data_dir.join("blobs"),
            config.public_url.clone(),
        ));

        Self {
            papers: PaperService::new(registry, blob_store),
            jwt: JwtManager::new(JwtConfig {
                secret: config.jwt_secret.clone(),
                ..Default::default()
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// HTTP server for the archive API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::from_config(&config));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            // permissive for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .nest("/api/papers", paper_routes(state.clone()))
            .nest("/api/admin", admin_routes(state.clone()))
            .nest("/api/users", user_routes(state.clone()))
            .nest("/api/home", home_routes(state))
            .layer(cors)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start serving
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        println!("papervault listening on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_state_wires_from_config() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig {
            data_dir: temp.path().to_path_buf(),
            public_url: "https://files.test.edu".to_string(),
            ..Default::default()
        };

        let state = AppState::from_config(&config);
        assert!(state.papers.list_approved().unwrap().is_empty());
    }

    #[test]
    fn test_router_builds() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig {
            data_dir: temp.path().to_path_buf(),
            ..Default::default()
        };
        let _router = HttpServer::new(config).router();
    }
}
