use architecture::repository::{DBRepository, MutableRepository, ReadOnlyRepository};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use domain_work_order::{
    model::entity::work_order::{WorkOrder, WorkOrderStatus},
    repository::{CustomerDecisionUpdate, WorkOrderRepo},
};

use super::MemoryRepository;

#[async_trait::async_trait]
impl ReadOnlyRepository<WorkOrder> for MemoryRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<WorkOrder>> {
        Ok(self.work_orders.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait::async_trait]
impl MutableRepository<WorkOrder> for MemoryRepository {
    async fn insert(&self, entity: &WorkOrder) -> anyhow::Result<()> {
        self.work_orders.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &WorkOrder) -> anyhow::Result<()> {
        self.work_orders.insert(entity.id, entity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.work_orders.remove(&id).is_some())
    }
}

impl DBRepository<WorkOrder> for MemoryRepository {}

#[async_trait::async_trait]
impl WorkOrderRepo for MemoryRepository {
    async fn find_by_approval_token(&self, token: &str) -> anyhow::Result<Option<WorkOrder>> {
        Ok(self
            .work_orders
            .iter()
            .find(|entry| entry.approval_token.as_deref() == Some(token))
            .map(|entry| entry.clone()))
    }

    async fn list_by_dealership(&self, dealership_id: Uuid) -> anyhow::Result<Vec<WorkOrder>> {
        let mut orders: Vec<WorkOrder> = self
            .work_orders
            .iter()
            .filter(|entry| entry.dealership_id == dealership_id)
            .map(|entry| entry.clone())
            .collect();
        orders.sort_by(|a, b| b.created_time.cmp(&a.created_time));
        Ok(orders)
    }

    async fn set_approval_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let mut order = self
            .work_orders
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("there is no work order with id: {id}"))?;
        order.approval_token = Some(token.to_string());
        order.approval_token_expires_at = Some(expires_at);
        order.status = WorkOrderStatus::PendingCustomerApproval;
        order.last_modified_time = Utc::now();
        Ok(())
    }

    async fn finalize_customer_decision(
        &self,
        update: CustomerDecisionUpdate,
    ) -> anyhow::Result<bool> {
        // Check and mutation happen under the entry lock, mirroring the
        // conditional UPDATE of the database-backed repository.
        let Some(mut order) = self.work_orders.get_mut(&update.work_order_id) else {
            return Ok(false);
        };
        if order.status != WorkOrderStatus::PendingCustomerApproval {
            return Ok(false);
        }
        order.status = update.status;
        order.customer_notes = update.customer_notes;
        order.last_modified_time = update.decided_at;
        match update.status {
            WorkOrderStatus::CustomerApproved => order.approved_at = Some(update.decided_at),
            WorkOrderStatus::CustomerRejected => order.rejected_at = Some(update.decided_at),
            _ => {}
        }
        Ok(true)
    }

    async fn list_completed_between(
        &self,
        dealership_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> anyhow::Result<Vec<WorkOrder>> {
        Ok(self
            .work_orders
            .iter()
            .filter(|entry| {
                entry.dealership_id == dealership_id
                    && entry.status == WorkOrderStatus::Completed
                    && entry.last_modified_time >= from
                    && entry.last_modified_time < to
            })
            .map(|entry| entry.clone())
            .collect())
    }
}
