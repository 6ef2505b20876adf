//! User notifications
//!
//! Notifications are created by other subsystems (invoicing, contracts,
//! payments) through [`NotificationService::create`] and scoped to the
//! receiving user; the HTTP surface only lists them and flips read flags.

pub mod handlers;
pub mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::field::FieldValue;
use crate::core::query::{default_limit, default_page};
use crate::store::Document;

pub use service::NotificationService;

/// Source subsystem of a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    #[default]
    System,
    Invoice,
    Contract,
    Payment,
    Service,
}

/// A user-scoped notification record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub is_read: bool,
    /// Free-form payload attached by the producing subsystem
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Notification {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "user_id" => self.user_id.into(),
            "is_read" => self.is_read.into(),
            _ => FieldValue::Null,
        }
    }
}

/// Query parameters for `GET /notifications`
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for NotificationListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Response envelope for the notification list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}
