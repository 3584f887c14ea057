use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::{
    exception::NotifyResult,
    model::entity::Notification,
    repository::NotificationRepo,
    service::{EmailMessage, EmailSender, SmsSender},
};

mock! {
    pub NotificationRepo {}
    #[async_trait]
    impl NotificationRepo for NotificationRepo {
        async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Notification>>;
        async fn unread_count(&self, user_id: Uuid) -> anyhow::Result<u64>;
        async fn mark_read(&self, id: Uuid) -> anyhow::Result<bool>;
        async fn mark_all_read(&self, user_id: Uuid) -> anyhow::Result<()>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Notification> for NotificationRepo {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Notification>>;
        async fn get_all(&self) -> anyhow::Result<Vec<Notification>>;
    }
    #[async_trait]
    impl MutableRepository<Notification> for NotificationRepo {
        async fn insert(&self, entity: &Notification) -> anyhow::Result<()>;
        async fn update(&self, entity: &Notification) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
    }
    impl DBRepository<Notification> for NotificationRepo {}
}

mock! {
    pub SmsSender {}
    #[async_trait]
    impl SmsSender for SmsSender {
        async fn send(&self, to: &str, body: &str) -> NotifyResult<()>;
    }
}

mock! {
    pub EmailSender {}
    #[async_trait]
    impl EmailSender for EmailSender {
        async fn send(&self, message: &EmailMessage) -> NotifyResult<()>;
    }
}
