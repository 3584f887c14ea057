use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use chrono::{DateTime, Utc};
use database_model::prelude::*;
use domain_work_order::{
    model::entity::work_order::{WorkOrder, WorkOrderStatus},
    repository::{CustomerDecisionUpdate, WorkOrderRepo},
};
use sea_orm::prelude::*;
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;

use super::SeaOrmRepository;

impl SeaOrmRepository {
    async fn assemble(&self, model: WorkOrderModel) -> anyhow::Result<WorkOrder> {
        let conn = self.db.get_connection();
        let parts = WorkOrderPartEntity::find()
            .filter(WorkOrderPartColumn::WorkOrderId.eq(model.id))
            .all(conn)
            .await?;
        let photos = WorkOrderPhotoEntity::find()
            .filter(WorkOrderPhotoColumn::WorkOrderId.eq(model.id))
            .all(conn)
            .await?;
        WorkOrder::try_assemble(model, parts, photos)
    }

    async fn replace_children(&self, entity: &WorkOrder) -> anyhow::Result<()> {
        let conn = self.db.get_connection();
        WorkOrderPartEntity::delete_many()
            .filter(WorkOrderPartColumn::WorkOrderId.eq(entity.id))
            .exec(conn)
            .await?;
        WorkOrderPhotoEntity::delete_many()
            .filter(WorkOrderPhotoColumn::WorkOrderId.eq(entity.id))
            .exec(conn)
            .await?;
        self.insert_children(entity).await
    }

    async fn insert_children(&self, entity: &WorkOrder) -> anyhow::Result<()> {
        let conn = self.db.get_connection();
        let parts = entity.part_models();
        if !parts.is_empty() {
            WorkOrderPartEntity::insert_many(
                parts.into_iter().map(|model| WorkOrderPartActiveModel::from(model).reset_all()),
            )
            .exec(conn)
            .await?;
        }
        let photos = entity.photo_models();
        if !photos.is_empty() {
            WorkOrderPhotoEntity::insert_many(
                photos.into_iter().map(|model| WorkOrderPhotoActiveModel::from(model).reset_all()),
            )
            .exec(conn)
            .await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReadOnlyRepository<WorkOrder> for SeaOrmRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<WorkOrder>> {
        let Some(model) = WorkOrderEntity::find_by_id(id).one(self.db.get_connection()).await?
        else {
            return Ok(None);
        };
        Ok(Some(self.assemble(model).await?))
    }
}

#[async_trait::async_trait]
impl MutableRepository<WorkOrder> for SeaOrmRepository {
    async fn insert(&self, entity: &WorkOrder) -> anyhow::Result<()> {
        WorkOrderEntity::insert(WorkOrderActiveModel::from(entity.to_model()).reset_all())
            .exec(self.db.get_connection())
            .await?;
        self.insert_children(entity).await
    }

    async fn update(&self, entity: &WorkOrder) -> anyhow::Result<()> {
        WorkOrderEntity::update(WorkOrderActiveModel::from(entity.to_model()).reset_all())
            .exec(self.db.get_connection())
            .await?;
        self.replace_children(entity).await
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        let conn = self.db.get_connection();
        WorkOrderPartEntity::delete_many()
            .filter(WorkOrderPartColumn::WorkOrderId.eq(id))
            .exec(conn)
            .await?;
        WorkOrderPhotoEntity::delete_many()
            .filter(WorkOrderPhotoColumn::WorkOrderId.eq(id))
            .exec(conn)
            .await?;
        let result = WorkOrderEntity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }
}

impl DBRepository<WorkOrder> for SeaOrmRepository {}

#[async_trait::async_trait]
impl WorkOrderRepo for SeaOrmRepository {
    async fn find_by_approval_token(&self, token: &str) -> anyhow::Result<Option<WorkOrder>> {
        let Some(model) = WorkOrderEntity::find()
            .filter(WorkOrderColumn::ApprovalToken.eq(token))
            .one(self.db.get_connection())
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(self.assemble(model).await?))
    }

    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<WorkOrder>> {
        let models = WorkOrderEntity::find()
            .filter(WorkOrderColumn::DealershipId.eq(dealership_id))
            .order_by_desc(WorkOrderColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?;
        let mut orders = Vec::with_capacity(models.len());
        for model in models {
            orders.push(self.assemble(model).await?);
        }
        Ok(orders)
    }

    async fn set_approval_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let active_model = WorkOrderActiveModel {
            id: Set(id),
            status: Set(WorkOrderStatus::PendingCustomerApproval.to_string()),
            approval_token: Set(Some(token.to_string())),
            approval_token_expires_at: Set(Some(expires_at)),
            last_modified_time: Set(Utc::now()),
            ..Default::default()
        };
        WorkOrderEntity::update(active_model).exec(self.db.get_connection()).await?;
        Ok(())
    }

    async fn finalize_customer_decision(
        &self,
        update: CustomerDecisionUpdate,
    ) -> anyhow::Result<bool> {
        let mut active_model = WorkOrderActiveModel {
            status: Set(update.status.to_string()),
            customer_notes: Set(update.customer_notes.clone()),
            last_modified_time: Set(update.decided_at),
            ..Default::default()
        };
        match update.status {
            WorkOrderStatus::CustomerApproved => {
                active_model.approved_at = Set(Some(update.decided_at));
            }
            WorkOrderStatus::CustomerRejected => {
                active_model.rejected_at = Set(Some(update.decided_at));
            }
            _ => {}
        }

        // The awaiting-status filter is the concurrency guard: a second
        // finalize finds zero matching rows.
        let result = WorkOrderEntity::update_many()
            .set(active_model)
            .filter(WorkOrderColumn::Id.eq(update.work_order_id))
            .filter(
                WorkOrderColumn::Status
                    .eq(WorkOrderStatus::PendingCustomerApproval.to_string()),
            )
            .exec(self.db.get_connection())
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_completed_between(
        &self,
        dealership_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<WorkOrder>> {
        let models = WorkOrderEntity::find()
            .filter(WorkOrderColumn::DealershipId.eq(dealership_id))
            .filter(WorkOrderColumn::Status.eq(WorkOrderStatus::Completed.to_string()))
            .filter(WorkOrderColumn::LastModifiedTime.gte(from))
            .filter(WorkOrderColumn::LastModifiedTime.lt(to))
            .all(self.db.get_connection())
            .await?;
        let mut orders = Vec::with_capacity(models.len());
        for model in models {
            orders.push(self.assemble(model).await?);
        }
        Ok(orders)
    }
}
