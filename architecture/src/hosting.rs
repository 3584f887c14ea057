use async_trait::async_trait;

/// A long-running task hosted beside the web server, aborted on shutdown.
#[async_trait]
pub trait BackgroundService: Send + Sync {
    async fn run(&self);
}
