//! Tenant records
//!
//! Tenants are owner-scoped: every query and mutation carries the owner id
//! explicitly and only sees that owner's records. Deletion is a tombstone
//! flag (`is_deleted`), checked by every read path; a soft-deleted tenant's
//! phone and ID card become reusable.

pub mod handlers;
pub mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::field::FieldValue;
use crate::core::query::{default_limit, default_page};
use crate::store::Document;

pub use service::TenantService;

/// Tenant lifecycle status.
///
/// `RENTING` is system-managed: it is assigned by room/contract transitions
/// through the internal update path and may not be set directly by API
/// callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    #[default]
    Active,
    Closed,
    Renting,
    Deposited,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "ACTIVE",
            TenantStatus::Closed => "CLOSED",
            TenantStatus::Renting => "RENTING",
            TenantStatus::Deposited => "DEPOSITED",
        }
    }
}

/// An owner-scoped tenant record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub owner_id: Uuid,

    /// Human-readable code, unique per owner (`T-<base36 millis>-<digits>`)
    pub code: String,

    pub full_name: String,

    /// Diacritics-stripped lowercase rendering of `full_name`, kept in sync
    /// for search
    pub full_name_normalized: String,

    /// Unique per owner among non-deleted tenants
    pub phone: String,

    /// Unique per owner among non-deleted tenants
    pub id_card: String,

    pub status: TenantStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_room_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Tenant {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "owner_id" => self.owner_id.into(),
            "code" => self.code.clone().into(),
            "full_name" => self.full_name.clone().into(),
            "full_name_normalized" => self.full_name_normalized.clone().into(),
            "phone" => self.phone.clone().into(),
            "id_card" => self.id_card.clone().into(),
            "status" => self.status.as_str().into(),
            "current_room_id" => self.current_room_id.into(),
            "is_deleted" => self.is_deleted.into(),
            _ => FieldValue::Null,
        }
    }
}

/// Payload for `POST /tenants`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenant {
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,

    #[validate(length(min = 8, max = 15))]
    pub phone: String,

    #[validate(length(min = 9, max = 12))]
    pub id_card: String,

    pub status: Option<TenantStatus>,

    pub current_room_id: Option<Uuid>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 250))]
    pub address: Option<String>,

    #[validate(length(max = 500))]
    pub note: Option<String>,
}

/// Payload for `PUT`/`PATCH /tenants/{id}`; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenant {
    #[validate(length(min = 1, max = 120))]
    pub full_name: Option<String>,

    #[validate(length(min = 8, max = 15))]
    pub phone: Option<String>,

    #[validate(length(min = 9, max = 12))]
    pub id_card: Option<String>,

    pub status: Option<TenantStatus>,

    pub current_room_id: Option<Uuid>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 250))]
    pub address: Option<String>,

    #[validate(length(max = 500))]
    pub note: Option<String>,
}

/// Query parameters for `GET /tenants`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantListQuery {
    pub search: Option<String>,

    pub status: Option<TenantStatus>,

    pub current_room_id: Option<Uuid>,

    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for TenantListQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            current_room_id: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}
