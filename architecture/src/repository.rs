use async_trait::async_trait;
use uuid::Uuid;

/// Read side of an entity repository.
#[async_trait]
pub trait ReadOnlyRepository<T>: Send + Sync {
    /// Returns the entity, or `None` when no row matches the id.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<T>>;

    async fn get_all(&self) -> anyhow::Result<Vec<T>> {
        unimplemented!()
    }
}

/// Write side of an entity repository.
#[async_trait]
pub trait MutableRepository<T>: Send + Sync {
    async fn insert(&self, entity: &T) -> anyhow::Result<()>;

    async fn update(&self, entity: &T) -> anyhow::Result<()>;

    /// Returns false when no row matched the id.
    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool>;
}

pub trait DBRepository<T>: ReadOnlyRepository<T> + MutableRepository<T> {}
