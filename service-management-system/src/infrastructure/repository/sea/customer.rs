use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use database_model::prelude::*;
use domain_work_order::{model::entity::Customer, repository::CustomerRepo};
use sea_orm::prelude::*;
use sea_orm::QueryOrder;

use super::SeaOrmRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<Customer> for SeaOrmRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        Ok(CustomerEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Customer::from))
    }
}

#[async_trait::async_trait]
impl MutableRepository<Customer> for SeaOrmRepository {
    async fn insert(&self, entity: &Customer) -> anyhow::Result<()> {
        CustomerEntity::insert(
            CustomerActiveModel::from(CustomerModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn update(&self, entity: &Customer) -> anyhow::Result<()> {
        CustomerEntity::update(
            CustomerActiveModel::from(CustomerModel::from(entity.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = CustomerEntity::delete_by_id(id).exec(self.db.get_connection()).await?;
        Ok(result.rows_affected > 0)
    }
}

impl DBRepository<Customer> for SeaOrmRepository {}

#[async_trait::async_trait]
impl CustomerRepo for SeaOrmRepository {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Customer>> {
        Ok(CustomerEntity::find()
            .filter(CustomerColumn::DealershipId.eq(dealership_id))
            .order_by_asc(CustomerColumn::Name)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Customer::from)
            .collect())
    }
}
