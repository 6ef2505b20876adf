//! HTTP server assembly
//!
//! [`ServerBuilder`] turns an [`AppConfig`] and an [`AppState`] into an
//! `axum::Router`: resource routes under the API prefix, health routes at
//! the root, CORS and request tracing layered on top.

pub mod extract;

use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::notifications::NotificationService;
use crate::services::ServiceCatalog;
use crate::tenants::TenantService;

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub tenants: TenantService,
    pub notifications: NotificationService,
    pub services: ServiceCatalog,
}

impl AppState {
    /// Create state over fresh in-memory collections
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for the HTTP application
///
/// # Example
///
/// ```rust,ignore
/// let app = ServerBuilder::new(AppConfig::default()).build();
/// axum::serve(listener, app).await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    state: Option<AppState>,
}

impl ServerBuilder {
    /// Create a builder for the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Use an existing state instead of fresh collections.
    ///
    /// Useful in tests that need a handle on the services behind the router.
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the router: resource routes under the API prefix, health routes
    /// at the root, CORS and trace layers on top.
    pub fn build(self) -> Router {
        let state = self.state.unwrap_or_default();

        let api = Router::new()
            .merge(crate::tenants::handlers::routes())
            .merge(crate::notifications::handlers::routes())
            .merge(crate::services::handlers::routes())
            .with_state(state);

        let prefix = self.config.api_prefix.trim_matches('/');
        let api = if prefix.is_empty() {
            api
        } else {
            Router::new().nest(&format!("/{prefix}"), api)
        };

        health_routes().merge(api).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&self.config)),
        )
    }
}

/// Build the CORS layer from the configured origins
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(extract::OWNER_ID_HEADER),
            HeaderName::from_static(extract::USER_ID_HEADER),
        ])
}

/// Health check routes, served outside the API prefix
fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "rentfolio"
    }))
}
