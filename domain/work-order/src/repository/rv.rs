use architecture::repository::DBRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::Rv;

#[async_trait]
pub trait RvRepo: DBRepository<Rv> + Send + Sync {
    async fn list_by_customer(&self, customer_id: Uuid) -> anyhow::Result<Vec<Rv>>;
}
