use architecture::repository::DBRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::Notification;

#[async_trait]
pub trait NotificationRepo: DBRepository<Notification> + Send + Sync {
    /// Notifications of one user, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Notification>>;

    async fn unread_count(&self, user_id: Uuid) -> anyhow::Result<u64>;

    /// Returns false when the notification does not exist.
    async fn mark_read(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn mark_all_read(&self, user_id: Uuid) -> anyhow::Result<()>;
}
