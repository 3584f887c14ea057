use architecture::repository::DBRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::Part;

#[async_trait]
pub trait PartRepo: DBRepository<Part> + Send + Sync {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Part>>;
}
