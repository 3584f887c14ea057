use async_trait::async_trait;
use uuid::Uuid;

use crate::model::entity::ApprovalLog;

/// Append-only; there is deliberately no update or delete.
#[async_trait]
pub trait ApprovalLogRepo: Send + Sync {
    async fn append(&self, entry: &ApprovalLog) -> anyhow::Result<()>;

    async fn list_by_work_order(&self, work_order_id: Uuid) -> anyhow::Result<Vec<ApprovalLog>>;
}
