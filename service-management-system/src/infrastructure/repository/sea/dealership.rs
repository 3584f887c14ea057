use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_account::{model::entity::Dealership, repository::DealershipRepo};
use sea_orm::prelude::*;

use super::SeaOrmRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<Dealership> for SeaOrmRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Dealership>> {
        Ok(DealershipEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Dealership::from))
    }
}

#[async_trait::async_trait]
impl MutableRepository<Dealership> for SeaOrmRepository {
    async fn insert(&self, entity: &Dealership) -> anyhow::Result<()> {
        DealershipEntity::insert(
            DealershipActiveModel::from(DealershipModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn update(&self, entity: &Dealership) -> anyhow::Result<()> {
        DealershipEntity::update(
            DealershipActiveModel::from(DealershipModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = DealershipEntity::delete_by_id(id).exec(self.db.get_connection()).await?;
        Ok(result.rows_affected > 0)
    }
}

impl DBRepository<Dealership> for SeaOrmRepository {}

impl DealershipRepo for SeaOrmRepository {}
