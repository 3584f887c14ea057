use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_work_order::{model::entity::Part, repository::PartRepo};
use sea_orm::prelude::*;
use sea_orm::QueryOrder;

use super::SeaOrmRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<Part> for SeaOrmRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Part>> {
        Ok(PartEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Part::from))
    }
}

#[async_trait::async_trait]
impl MutableRepository<Part> for SeaOrmRepository {
    async fn insert(&self, entity: &Part) -> anyhow::Result<()> {
        PartEntity::insert(PartActiveModel::from(PartModel::from(entity.clone())).reset_all())
            .exec(self.db.get_connection())
            .await?;
        Ok(())
    }

    async fn update(&self, entity: &Part) -> anyhow::Result<()> {
        PartEntity::update(PartActiveModel::from(PartModel::from(entity.clone())).reset_all())
            .exec(self.db.get_connection())
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = PartEntity::delete_by_id(id).exec(self.db.get_connection()).await?;
        Ok(result.rows_affected > 0)
    }
}

impl DBRepository<Part> for SeaOrmRepository {}

#[async_trait::async_trait]
impl PartRepo for SeaOrmRepository {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Part>> {
        Ok(PartEntity::find()
            .filter(PartColumn::DealershipId.eq(dealership_id))
            .order_by_asc(PartColumn::Name)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Part::from)
            .collect())
    }
}
