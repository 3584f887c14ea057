use architecture::repository::DBRepository;
use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::profile::{Profile, Role};

#[async_trait]
pub trait ProfileRepo: DBRepository<Profile> + Send + Sync {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Profile>>;

    /// Active profiles of the dealership whose role is in `roles`.
    async fn list_active_in_roles(
        &self,
        dealership_id: Uuid,
        roles: &[Role],
    ) -> anyhow::Result<Vec<Profile>>;
}
