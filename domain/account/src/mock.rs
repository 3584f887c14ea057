use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use mockall::mock;
use uuid::Uuid;

use crate::{
    exception::AccountResult,
    model::entity::{
        profile::{Profile, Role},
        Dealership,
    },
    repository::{DealershipRepo, ProfileRepo},
    service::IdentityService,
};

mock! {
    pub DealershipRepo {}
    impl DealershipRepo for DealershipRepo {}
    #[async_trait]
    impl ReadOnlyRepository<Dealership> for DealershipRepo {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Dealership>>;
        async fn get_all(&self) -> anyhow::Result<Vec<Dealership>>;
    }
    #[async_trait]
    impl MutableRepository<Dealership> for DealershipRepo {
        async fn insert(&self, entity: &Dealership) -> anyhow::Result<()>;
        async fn update(&self, entity: &Dealership) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
    }
    impl DBRepository<Dealership> for DealershipRepo {}
}

mock! {
    pub ProfileRepo {}
    #[async_trait]
    impl ProfileRepo for ProfileRepo {
        async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Profile>>;
        async fn list_active_in_roles(
            &self,
            dealership_id: Uuid,
            roles: &[Role],
        ) -> anyhow::Result<Vec<Profile>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Profile> for ProfileRepo {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>>;
        async fn get_all(&self) -> anyhow::Result<Vec<Profile>>;
    }
    #[async_trait]
    impl MutableRepository<Profile> for ProfileRepo {
        async fn insert(&self, entity: &Profile) -> anyhow::Result<()>;
        async fn update(&self, entity: &Profile) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
    }
    impl DBRepository<Profile> for ProfileRepo {}
}

mock! {
    pub IdentityService {}
    #[async_trait]
    impl IdentityService for IdentityService {
        async fn create_identity(&self, email: &str, password: &str) -> AccountResult<Uuid>;
        async fn delete_identity(&self, identity_id: Uuid) -> AccountResult<()>;
    }
}
