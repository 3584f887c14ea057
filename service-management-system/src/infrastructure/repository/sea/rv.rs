use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_work_order::{model::entity::Rv, repository::RvRepo};
use sea_orm::prelude::*;

use super::SeaOrmRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<Rv> for SeaOrmRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Rv>> {
        Ok(RvEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Rv::from))
    }
}

#[async_trait::async_trait]
impl MutableRepository<Rv> for SeaOrmRepository {
    async fn insert(&self, entity: &Rv) -> anyhow::Result<()> {
        RvEntity::insert(RvActiveModel::from(RvModel::from(entity.clone())).reset_all())
            .exec(self.db.get_connection())
            .await?;
        Ok(())
    }

    async fn update(&self, entity: &Rv) -> anyhow::Result<()> {
        RvEntity::update(RvActiveModel::from(RvModel::from(entity.clone())).reset_all())
            .exec(self.db.get_connection())
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = RvEntity::delete_by_id(id).exec(self.db.get_connection()).await?;
        Ok(result.rows_affected > 0)
    }
}

impl DBRepository<Rv> for SeaOrmRepository {}

#[async_trait::async_trait]
impl RvRepo for SeaOrmRepository {
    async fn list_by_customer(&self, customer_id: Uuid) -> anyhow::Result<Vec<Rv>> {
        Ok(RvEntity::find()
            .filter(RvColumn::CustomerId.eq(customer_id))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Rv::from)
            .collect())
    }
}
