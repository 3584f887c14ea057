use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use uuid::Uuid;

use domain_account::{
    exception::AccountResult,
    model::entity::{
        profile::{Profile, ProfileStatus, Role},
        Dealership,
    },
    repository::{DealershipRepo, ProfileRepo},
    service::IdentityService,
};

use super::MemoryRepository;

#[async_trait]
impl ReadOnlyRepository<Dealership> for MemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Dealership>> {
        Ok(self.dealerships.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait]
impl MutableRepository<Dealership> for MemoryRepository {
    async fn insert(&self, entity: &Dealership) -> anyhow::Result<()> {
        self.dealerships.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &Dealership) -> anyhow::Result<()> {
        self.dealerships.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.dealerships.remove(&id).is_some())
    }
}

impl DBRepository<Dealership> for MemoryRepository {}

impl DealershipRepo for MemoryRepository {}

#[async_trait]
impl ReadOnlyRepository<Profile> for MemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        Ok(self.profiles.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait]
impl MutableRepository<Profile> for MemoryRepository {
    async fn insert(&self, entity: &Profile) -> anyhow::Result<()> {
        self.profiles.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &Profile) -> anyhow::Result<()> {
        self.profiles.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.profiles.remove(&id).is_some())
    }
}

impl DBRepository<Profile> for MemoryRepository {}

#[async_trait]
impl ProfileRepo for MemoryRepository {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Profile>> {
        Ok(self
            .profiles
            .iter()
            .filter(|entry| entry.dealership_id == dealership_id)
            .map(|entry| entry.clone())
            .collect())
    }

    async fn list_active_in_roles(
        &self,
        dealership_id: Uuid,
        roles: &[Role],
    ) -> anyhow::Result<Vec<Profile>> {
        Ok(self
            .profiles
            .iter()
            .filter(|entry| {
                entry.dealership_id == dealership_id
                    && entry.status == ProfileStatus::Active
                    && roles.contains(&entry.role)
            })
            .map(|entry| entry.clone())
            .collect())
    }
}

/// Identity provider stand-in for memory mode: identities live only in this
/// process.
#[derive(Default)]
pub struct MemoryIdentityService {
    identities: dashmap::DashMap<Uuid, String>,
}

#[async_trait]
impl IdentityService for MemoryIdentityService {
    async fn create_identity(&self, email: &str, _password: &str) -> AccountResult<Uuid> {
        let id = Uuid::new_v4();
        self.identities.insert(id, email.to_string());
        Ok(id)
    }

    async fn delete_identity(&self, identity_id: Uuid) -> AccountResult<()> {
        self.identities.remove(&identity_id);
        Ok(())
    }
}
