use std::sync::Arc;

use architecture::hosting::BackgroundService;
use architecture::message_queue::{MessageQueueProducer, MessageQueueProducerTemplate};
use async_trait::async_trait;

use domain_notify::service::StatusNotifyService;
use domain_work_order::model::vo::msg::StatusChangeMsg;

pub const STATUS_TOPIC: &str = "work-order-status";

#[derive(Debug, Clone)]
pub struct InternalMessage {
    pub target: String,
    pub body: String,
}

/// In-process message queue over an unbounded flume channel. Producers are
/// cheap to clone; consumers take a receiver handle.
pub struct InternalMessageQueueProducer {
    sender: flume::Sender<InternalMessage>,
    receiver: flume::Receiver<InternalMessage>,
}

impl InternalMessageQueueProducer {
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    pub fn receiver(&self) -> flume::Receiver<InternalMessage> {
        self.receiver.clone()
    }
}

impl Default for InternalMessageQueueProducer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageQueueProducer for InternalMessageQueueProducer {
    async fn send(&self, content: &str, topic: Option<&str>) -> anyhow::Result<()> {
        Ok(self
            .sender
            .send_async(InternalMessage {
                target: topic.unwrap_or_default().to_string(),
                body: content.to_string(),
            })
            .await?)
    }
}

#[async_trait]
impl<T> MessageQueueProducerTemplate<T> for InternalMessageQueueProducer
where
    T: serde::Serialize + Send + Sync,
{
    async fn send_object(&self, content: &T, topic: Option<&str>) -> anyhow::Result<()> {
        self.send(&serde_json::to_string(content)?, topic).await
    }
}

/// Drains the status topic and hands each change to the notifier. Hosted
/// beside the web server for the life of the process.
#[derive(typed_builder::TypedBuilder)]
pub struct StatusChangeConsumer {
    receiver: flume::Receiver<InternalMessage>,
    status_notify_service: Arc<dyn StatusNotifyService>,
}

#[async_trait]
impl BackgroundService for StatusChangeConsumer {
    async fn run(&self) {
        while let Ok(message) = self.receiver.recv_async().await {
            if message.target != STATUS_TOPIC {
                continue;
            }
            match serde_json::from_str::<StatusChangeMsg>(&message.body) {
                Ok(msg) => {
                    if let Err(e) = self.status_notify_service.handle(msg).await {
                        tracing::error!(error = %e, "status change notification failed");
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, body = %message.body, "undecodable status message")
                }
            }
        }
    }
}
