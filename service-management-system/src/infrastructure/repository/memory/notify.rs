use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use uuid::Uuid;

use domain_notify::{model::entity::Notification, repository::NotificationRepo};
use domain_work_order::{model::entity::ApprovalLog, repository::ApprovalLogRepo};

use super::MemoryRepository;

#[async_trait]
impl ApprovalLogRepo for MemoryRepository {
    async fn append(&self, entry: &ApprovalLog) -> anyhow::Result<()> {
        self.approval_logs.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_by_work_order(&self, work_order_id: Uuid) -> anyhow::Result<Vec<ApprovalLog>> {
        Ok(self
            .approval_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.work_order_id == work_order_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReadOnlyRepository<Notification> for MemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Notification>> {
        Ok(self.notifications.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait]
impl MutableRepository<Notification> for MemoryRepository {
    async fn insert(&self, entity: &Notification) -> anyhow::Result<()> {
        self.notifications.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &Notification) -> anyhow::Result<()> {
        self.notifications.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.notifications.remove(&id).is_some())
    }
}

impl DBRepository<Notification> for MemoryRepository {}

#[async_trait]
impl NotificationRepo for MemoryRepository {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.clone())
            .collect();
        notifications.sort_by(|a, b| b.created_time.cmp(&a.created_time));
        Ok(notifications)
    }

    async fn unread_count(&self, user_id: Uuid) -> anyhow::Result<u64> {
        Ok(self
            .notifications
            .iter()
            .filter(|entry| entry.user_id == user_id && !entry.read)
            .count() as u64)
    }

    async fn mark_read(&self, id: Uuid) -> anyhow::Result<bool> {
        match self.notifications.get_mut(&id) {
            Some(mut entry) => {
                entry.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: Uuid) -> anyhow::Result<()> {
        for mut entry in self.notifications.iter_mut() {
            if entry.user_id == user_id {
                entry.read = true;
            }
        }
        Ok(())
    }
}
