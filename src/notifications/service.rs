//! Notification service: creation for producing subsystems, reads and
//! read-flag mutations for the owning user.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::ApiResult;
use crate::core::query::{clamp_limit, clamp_page};
use crate::notifications::{
    Notification, NotificationListQuery, NotificationPage, NotificationType,
};
use crate::store::{Collection, Filter, FindOptions, MemoryCollection};

/// User-scoped notification operations
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn Collection<Notification>>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    /// Create a service over a fresh in-memory collection
    pub fn new() -> Self {
        Self::with_collection(Arc::new(MemoryCollection::new()))
    }

    /// Create a service over an existing collection
    pub fn with_collection(notifications: Arc<dyn Collection<Notification>>) -> Self {
        Self { notifications }
    }

    /// Record a notification for the user. Called by other subsystems, not
    /// exposed over HTTP.
    pub async fn create(
        &self,
        user_id: Uuid,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationType,
        metadata: serde_json::Value,
    ) -> ApiResult<Notification> {
        let now = chrono::Utc::now();
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            message: message.into(),
            kind,
            is_read: false,
            metadata,
            created_at: now,
            updated_at: now,
        };
        Ok(self.notifications.insert(notification).await?)
    }

    /// List the user's notifications, newest first; page fetch and count run
    /// concurrently.
    pub async fn find_all(
        &self,
        user_id: Uuid,
        query: &NotificationListQuery,
    ) -> ApiResult<NotificationPage> {
        let page = clamp_page(query.page);
        let limit = clamp_limit(query.limit);
        let filter = Filter::new().eq("user_id", user_id);
        let options = FindOptions::page((page - 1) * limit, limit);

        let (notifications, total) = futures::try_join!(
            self.notifications.find(&filter, options),
            self.notifications.count(&filter)
        )?;

        Ok(NotificationPage {
            notifications,
            total,
            page,
            total_pages: total.div_ceil(limit),
        })
    }

    /// Count the user's unread notifications
    pub async fn count_unread(&self, user_id: Uuid) -> ApiResult<usize> {
        let filter = Filter::new().eq("user_id", user_id).eq("is_read", false);
        Ok(self.notifications.count(&filter).await?)
    }

    /// Flip the read flag on one of the user's notifications.
    ///
    /// Returns `None` when the id does not exist or belongs to another user;
    /// the HTTP layer surfaces that as a JSON `null`, not a 404.
    pub async fn mark_as_read(&self, id: Uuid, user_id: Uuid) -> ApiResult<Option<Notification>> {
        let filter = Filter::new().eq("id", id).eq("user_id", user_id);
        let updated = self
            .notifications
            .update_one(
                &filter,
                Box::new(|notification: &mut Notification| {
                    notification.is_read = true;
                    notification.updated_at = chrono::Utc::now();
                }),
            )
            .await?;
        Ok(updated)
    }

    /// Mark every unread notification of the user as read
    pub async fn mark_all_as_read(&self, user_id: Uuid) -> ApiResult<usize> {
        let filter = Filter::new().eq("user_id", user_id).eq("is_read", false);
        let touched = self
            .notifications
            .update_many(
                &filter,
                Box::new(|notification: &mut Notification| {
                    notification.is_read = true;
                    notification.updated_at = chrono::Utc::now();
                }),
            )
            .await?;
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(service: &NotificationService, user_id: Uuid, n: usize) {
        for i in 0..n {
            service
                .create(
                    user_id,
                    format!("title {i}"),
                    format!("message {i}"),
                    NotificationType::System,
                    serde_json::json!({}),
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_find_all_pages() {
        let service = NotificationService::new();
        let user = Uuid::new_v4();
        seed(&service, user, 25).await;

        let page = service
            .find_all(user, &NotificationListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.notifications.len(), 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);

        let beyond = service
            .find_all(
                user,
                &NotificationListQuery {
                    page: 4,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(beyond.notifications.is_empty());
        assert_eq!(beyond.total, 25);
    }

    #[tokio::test]
    async fn test_unread_count_and_mark_as_read() {
        let service = NotificationService::new();
        let user = Uuid::new_v4();
        seed(&service, user, 3).await;
        assert_eq!(service.count_unread(user).await.unwrap(), 3);

        let page = service
            .find_all(user, &NotificationListQuery::default())
            .await
            .unwrap();
        let first = &page.notifications[0];

        let updated = service.mark_as_read(first.id, user).await.unwrap().unwrap();
        assert!(updated.is_read);
        assert_eq!(service.count_unread(user).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mark_as_read_foreign_user_is_null() {
        let service = NotificationService::new();
        let user = Uuid::new_v4();
        seed(&service, user, 1).await;
        let page = service
            .find_all(user, &NotificationListQuery::default())
            .await
            .unwrap();

        let other = Uuid::new_v4();
        let updated = service
            .mark_as_read(page.notifications[0].id, other)
            .await
            .unwrap();
        assert!(updated.is_none());

        // And the original user's record stayed unread
        assert_eq!(service.count_unread(user).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_all_as_read_scoped_to_user() {
        let service = NotificationService::new();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        seed(&service, user, 3).await;
        seed(&service, other, 2).await;

        let touched = service.mark_all_as_read(user).await.unwrap();
        assert_eq!(touched, 3);
        assert_eq!(service.count_unread(user).await.unwrap(), 0);
        assert_eq!(service.count_unread(other).await.unwrap(), 2);
    }
}
