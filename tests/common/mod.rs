//! Shared test-server setup for the API integration suites

use axum_test::TestServer;
use rentfolio::config::AppConfig;
use rentfolio::server::{AppState, ServerBuilder};

/// Config without an API prefix so tests hit `/tenants` directly
pub fn test_config() -> AppConfig {
    AppConfig {
        api_prefix: String::new(),
        ..Default::default()
    }
}

/// Build a test server plus a handle on the state behind it
pub fn test_server() -> (TestServer, AppState) {
    let state = AppState::new();
    let app = ServerBuilder::new(test_config())
        .with_state(state.clone())
        .build();
    (TestServer::try_new(app).expect("test server"), state)
}
