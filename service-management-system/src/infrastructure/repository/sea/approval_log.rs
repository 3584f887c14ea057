use database_model::prelude::*;
use domain_work_order::{model::entity::ApprovalLog, repository::ApprovalLogRepo};
use sea_orm::prelude::*;
use sea_orm::QueryOrder;

use super::SeaOrmRepository;

#[async_trait::async_trait]
impl ApprovalLogRepo for SeaOrmRepository {
    async fn append(&self, entry: &ApprovalLog) -> anyhow::Result<()> {
        ApprovalLogEntity::insert(
            ApprovalLogActiveModel::from(ApprovalLogModel::from(entry.clone())).reset_all(),
        )
        .exec(self.db.get_connection())
        .await?;
        Ok(())
    }

    async fn list_by_work_order(&self, work_order_id: Uuid) -> anyhow::Result<Vec<ApprovalLog>> {
        ApprovalLogEntity::find()
            .filter(ApprovalLogColumn::WorkOrderId.eq(work_order_id))
            .order_by_asc(ApprovalLogColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(ApprovalLog::try_from)
            .collect()
    }
}
