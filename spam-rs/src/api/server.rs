//! API Server - HTTP server for the prediction endpoint

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{self, AppState};
use crate::config::ServerConfig;
use crate::error::{Result, SpamError};
use crate::spam::SpamClassifier;

/// HTTP front end of a loaded classifier
pub struct ApiServer {
    state: Arc<AppState>,
    allowed_origins: Vec<HeaderValue>,
    max_body_bytes: usize,
    addr: String,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(classifier: SpamClassifier, config: &ServerConfig) -> Result<Self> {
        let allowed_origins = config
            .cors_allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    SpamError::Config(format!("Invalid CORS origin '{}': {}", origin, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            state: Arc::new(AppState { classifier }),
            allowed_origins,
            max_body_bytes: config.max_body_bytes,
            addr: config.listen_addr.clone(),
        })
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let origin = if self.allowed_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(self.allowed_origins.clone())
        };
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/predict", post(handlers::predict))
            .route("/health", get(handlers::health))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors)
                    .layer(DefaultBodyLimit::max(self.max_body_bytes)),
            )
            .with_state(self.state.clone())
    }

    /// Start the API server
    pub async fn run(&self) -> Result<()> {
        let router = self.router();

        info!(
            "Starting API server on {} ({} features)",
            self.addr,
            self.state.classifier.row_width()
        );

        let listener = TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
