use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_notify::{model::entity::Notification, repository::NotificationRepo};
use sea_orm::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;

use super::SeaOrmRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<Notification> for SeaOrmRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Notification>> {
        NotificationEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Notification::try_from)
            .transpose()
    }
}

#[async_trait::async_trait]
impl MutableRepository<Notification> for SeaOrmRepository {
    async fn insert(&self, entity: &Notification) -> anyhow::Result<()> {
        NotificationEntity::insert(
            NotificationActiveModel::from(NotificationModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn update(&self, entity: &Notification) -> anyhow::Result<()> {
        NotificationEntity::update(
            NotificationActiveModel::from(NotificationModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = NotificationEntity::delete_by_id(id).exec(self.db.get_connection()).await?;
        Ok(result.rows_affected > 0)
    }
}

impl DBRepository<Notification> for SeaOrmRepository {}

#[async_trait::async_trait]
impl NotificationRepo for SeaOrmRepository {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Notification>> {
        NotificationEntity::find()
            .filter(NotificationColumn::UserId.eq(user_id))
            .order_by_desc(NotificationColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    async fn unread_count(&self, user_id: Uuid) -> anyhow::Result<u64> {
        Ok(NotificationEntity::find()
            .filter(NotificationColumn::UserId.eq(user_id))
            .filter(NotificationColumn::IsRead.eq(false))
            .count(self.db.get_connection())
            .await?)
    }

    async fn mark_read(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = NotificationEntity::update_many()
            .set(NotificationActiveModel {
                is_read: Set(true),
                ..Default::default()
            })
            .filter(NotificationColumn::Id.eq(id))
            .exec(self.db.get_connection())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> anyhow::Result<()> {
        NotificationEntity::update_many()
            .set(NotificationActiveModel {
                is_read: Set(true),
                ..Default::default()
            })
            .filter(NotificationColumn::UserId.eq(user_id))
            .exec(self.db.get_connection())
            .await?;
        Ok(())
    }
}
