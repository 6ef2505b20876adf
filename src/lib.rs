//! # Rentfolio
//!
//! Property, tenant and contract management REST backend.
//!
//! ## Features
//!
//! - **Owner-scoped resources**: every query carries the owner/user id as an
//!   explicit parameter; records are isolated per landlord account
//! - **Soft Delete**: tombstone flag checked by every read path; deleted
//!   records free their unique fields for reuse
//! - **Uniqueness checks**: phone and ID card are unique per owner among
//!   live tenants; human-readable tenant codes generated with collision
//!   retries
//! - **Shared list-query builder**: one filter model (exact scoping ids +
//!   diacritic-insensitive text search) across every list endpoint
//! - **Consistent pagination**: newest-first, `{ data, meta }` envelope,
//!   page fetch and total count issued concurrently
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rentfolio::prelude::*;
//!
//! let config = AppConfig::default();
//! let app = ServerBuilder::new(config).build();
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod notifications;
pub mod server;
pub mod services;
pub mod store;
pub mod tenants;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, ConflictCode, FieldValue, Paginated, PaginationMeta, normalize_search,
    };

    // === Store ===
    pub use crate::store::{Collection, Document, Filter, FindOptions, MemoryCollection};

    // === Resources ===
    pub use crate::notifications::{Notification, NotificationService, NotificationType};
    pub use crate::services::{Service, ServiceCatalog};
    pub use crate::tenants::{Tenant, TenantService, TenantStatus};

    // === Server ===
    pub use crate::config::AppConfig;
    pub use crate::server::extract::{OwnerId, UserId, ValidatedJson};
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
