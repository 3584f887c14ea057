use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use uuid::Uuid;

use domain_work_order::{
    model::entity::{Customer, Part, Rv},
    repository::{CustomerRepo, PartRepo, RvRepo},
};

use super::MemoryRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<Part> for MemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Part>> {
        Ok(self.parts.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait::async_trait]
impl MutableRepository<Part> for MemoryRepository {
    async fn insert(&self, entity: &Part) -> anyhow::Result<()> {
        self.parts.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &Part) -> anyhow::Result<()> {
        self.parts.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.parts.remove(&id).is_some())
    }
}

impl DBRepository<Part> for MemoryRepository {}

#[async_trait::async_trait]
impl PartRepo for MemoryRepository {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Part>> {
        let mut parts: Vec<Part> = self
            .parts
            .iter()
            .filter(|entry| entry.dealership_id == dealership_id)
            .map(|entry| entry.clone())
            .collect();
        parts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(parts)
    }
}

#[async_trait::async_trait]
impl ReadOnlyRepository<Customer> for MemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Customer>> {
        Ok(self.customers.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait::async_trait]
impl MutableRepository<Customer> for MemoryRepository {
    async fn insert(&self, entity: &Customer) -> anyhow::Result<()> {
        self.customers.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &Customer) -> anyhow::Result<()> {
        self.customers.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.customers.remove(&id).is_some())
    }
}

impl DBRepository<Customer> for MemoryRepository {}

#[async_trait::async_trait]
impl CustomerRepo for MemoryRepository {
    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<Customer>> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .filter(|entry| entry.dealership_id == dealership_id)
            .map(|entry| entry.clone())
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }
}

#[async_trait::async_trait]
impl ReadOnlyRepository<Rv> for MemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Rv>> {
        Ok(self.rvs.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait::async_trait]
impl MutableRepository<Rv> for MemoryRepository {
    async fn insert(&self, entity: &Rv) -> anyhow::Result<()> {
        self.rvs.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &Rv) -> anyhow::Result<()> {
        self.rvs.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.rvs.remove(&id).is_some())
    }
}

impl DBRepository<Rv> for MemoryRepository {}

#[async_trait::async_trait]
impl RvRepo for MemoryRepository {
    async fn list_by_customer(&self, customer_id: Uuid) -> anyhow::Result<Vec<Rv>> {
        Ok(self
            .rvs
            .iter()
            .filter(|entry| entry.customer_id == customer_id)
            .map(|entry| entry.clone())
            .collect())
    }
}
