use async_trait::async_trait;

#[async_trait]
pub trait MessageQueueProducer: Send + Sync {
    async fn send(&self, content: &str, topic: Option<&str>) -> anyhow::Result<()>;
}

#[async_trait]
pub trait MessageQueueProducerTemplate<T>: Send + Sync
where
    T: serde::Serialize + Send + Sync,
{
    async fn send_object(&self, content: &T, topic: Option<&str>) -> anyhow::Result<()>;
}
