use async_trait::async_trait;

use domain_work_order::model::vo::msg::StatusChangeMsg;

/// Consumes lifecycle status-change messages and fans them out as
/// notifications to the relevant staff.
#[async_trait]
pub trait StatusNotifyService: Send + Sync {
    async fn handle(&self, msg: StatusChangeMsg) -> anyhow::Result<()>;
}
