//! Chargeable-service catalog
//!
//! Owner-scoped catalog of billable services (electricity, water, parking,
//! cleaning). A service is priced either at a fixed rate per unit or via a
//! tier table, and applies to every building or to an explicit list.

pub mod handlers;
pub mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::field::FieldValue;
use crate::core::query::{default_limit, default_page};
use crate::store::Document;

pub use service::ServiceCatalog;

/// How a service is priced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    #[default]
    Fixed,
    Table,
}

/// Which buildings a service applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingScope {
    #[default]
    All,
    Specific,
}

impl BuildingScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingScope::All => "ALL",
            BuildingScope::Specific => "SPECIFIC",
        }
    }
}

/// One row of a tiered price table. `to_value = -1` means unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    #[validate(range(min = 0.0))]
    pub from_value: f64,

    #[validate(range(min = -1.0))]
    pub to_value: f64,

    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// An owner-scoped chargeable service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub owner_id: Uuid,

    pub name: String,

    /// Diacritics-stripped lowercase rendering of `name`, kept in sync for
    /// search
    pub name_normalized: String,

    /// Billing unit, e.g. "kWh", "m3", "tháng"
    pub unit: String,

    pub price_type: PriceType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_price: Option<f64>,

    pub price_tiers: Vec<PriceTier>,

    pub building_scope: BuildingScope,

    /// Building ids the service applies to when scope is `SPECIFIC`
    pub building_ids: Vec<Uuid>,

    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Service {
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
            "name" => self.name.clone().into(),
            "name_normalized" => self.name_normalized.clone().into(),
            "unit" => self.unit.clone().into(),
            "building_scope" => self.building_scope.as_str().into(),
            "building_ids" => {
                FieldValue::Array(self.building_ids.iter().map(|&id| id.into()).collect())
            }
            "is_active" => self.is_active.into(),
            "is_deleted" => self.is_deleted.into(),
            _ => FieldValue::Null,
        }
    }
}

/// Payload for `POST /services`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    #[validate(length(min = 1, max = 30))]
    pub unit: String,

    pub price_type: Option<PriceType>,

    #[validate(range(min = 0.0))]
    pub fixed_price: Option<f64>,

    #[validate(nested)]
    pub price_tiers: Option<Vec<PriceTier>>,

    pub building_scope: Option<BuildingScope>,

    pub building_ids: Option<Vec<Uuid>>,

    pub is_active: Option<bool>,
}

/// Payload for `PUT`/`PATCH /services/{id}`; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 30))]
    pub unit: Option<String>,

    pub price_type: Option<PriceType>,

    #[validate(range(min = 0.0))]
    pub fixed_price: Option<f64>,

    #[validate(nested)]
    pub price_tiers: Option<Vec<PriceTier>>,

    pub building_scope: Option<BuildingScope>,

    pub building_ids: Option<Vec<Uuid>>,

    pub is_active: Option<bool>,
}

/// Query parameters for `GET /services`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListQuery {
    pub search: Option<String>,

    pub building_id: Option<Uuid>,

    pub is_active: Option<bool>,

    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for ServiceListQuery {
    fn default() -> Self {
        Self {
            search: None,
            building_id: None,
            is_active: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}
