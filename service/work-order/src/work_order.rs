use std::sync::Arc;

use architecture::{
    message_queue::MessageQueueProducerTemplate,
    repository::{MutableRepository, ReadOnlyRepository},
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use domain_account::repository::DealershipRepo;
use domain_work_order::{
    exception::{WorkOrderException, WorkOrderResult},
    model::{
        entity::work_order::{WorkOrder, WorkOrderPart, WorkOrderStatus},
        vo::{msg::StatusChangeMsg, pricing, NewWorkOrder, RequestedPart, WorkOrderPatch},
    },
    repository::{CustomerRepo, PartRepo, RvRepo, WorkOrderRepo},
    service::WorkOrderService,
};

#[derive(typed_builder::TypedBuilder)]
pub struct WorkOrderServiceImpl {
    work_order_repo: Arc<dyn WorkOrderRepo>,
    part_repo: Arc<dyn PartRepo>,
    customer_repo: Arc<dyn CustomerRepo>,
    rv_repo: Arc<dyn RvRepo>,
    dealership_repo: Arc<dyn DealershipRepo>,
    status_mq_producer: Arc<dyn MessageQueueProducerTemplate<StatusChangeMsg>>,
    status_mq_topic: String,
}

#[async_trait]
impl WorkOrderService for WorkOrderServiceImpl {
    async fn create(&self, dealership_id: Uuid, order: NewWorkOrder) -> WorkOrderResult<WorkOrder> {
        if !matches!(
            order.status,
            WorkOrderStatus::Draft | WorkOrderStatus::Submitted
        ) {
            return Err(WorkOrderException::InvalidInitialStatus {
                status: order.status,
            });
        }

        self.customer_repo
            .find_by_id(order.customer_id)
            .await?
            .ok_or(WorkOrderException::CustomerNotFound {
                id: order.customer_id,
            })?;
        self.rv_repo
            .find_by_id(order.rv_id)
            .await?
            .ok_or(WorkOrderException::RvNotFound { id: order.rv_id })?;

        let settings = self
            .dealership_repo
            .find_by_id(dealership_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("there is no dealership with id: {dealership_id}"))?;

        let labor_rate = order.labor_rate.unwrap_or(settings.default_labor_rate);
        if order.labor_hours < Decimal::ZERO || labor_rate < Decimal::ZERO {
            return Err(WorkOrderException::NegativeLabor);
        }

        let parts = self
            .snapshot_parts(order.parts, settings.parts_markup_percent)
            .await?;

        let now = Utc::now();
        let mut work_order = WorkOrder {
            id: Uuid::new_v4(),
            dealership_id,
            rv_id: order.rv_id,
            customer_id: order.customer_id,
            issue_description: order.issue_description,
            photos: order.photos,
            parts,
            labor_hours: order.labor_hours,
            labor_rate,
            status: order.status,
            technician_notes: order.technician_notes,
            manager_notes: order.manager_notes,
            technician_id: order.technician_id,
            total_estimate: Decimal::ZERO,
            approval_token: None,
            approval_token_expires_at: None,
            customer_notes: None,
            approved_at: None,
            rejected_at: None,
            created_time: now,
            last_modified_time: now,
        };
        work_order.recompute_total();

        self.work_order_repo.insert(&work_order).await?;
        tracing::info!(id = %work_order.id, status = %work_order.status, "work order created");

        if work_order.status.raises_notification() {
            self.publish_status(&work_order).await?;
        }
        Ok(work_order)
    }

    async fn update(&self, id: Uuid, patch: WorkOrderPatch) -> WorkOrderResult<WorkOrder> {
        let mut work_order = self
            .work_order_repo
            .find_by_id(id)
            .await?
            .ok_or(WorkOrderException::WorkOrderNotFound { id })?;

        if patch.labor_hours.is_some_and(|hours| hours < Decimal::ZERO)
            || patch.labor_rate.is_some_and(|rate| rate < Decimal::ZERO)
        {
            return Err(WorkOrderException::NegativeLabor);
        }

        let previous_status = work_order.status;
        if let Some(next) = patch.status {
            if next != previous_status && !previous_status.can_transition_to(next) {
                return Err(WorkOrderException::InvalidStatusTransition {
                    from: previous_status,
                    to: next,
                });
            }
        }

        work_order.apply(patch, Utc::now());
        self.work_order_repo.update(&work_order).await?;

        if work_order.status != previous_status && work_order.status.raises_notification() {
            self.publish_status(&work_order).await?;
        }
        Ok(work_order)
    }

    async fn force_set_status(
        &self,
        id: Uuid,
        status: WorkOrderStatus,
    ) -> WorkOrderResult<WorkOrder> {
        let mut work_order = self
            .work_order_repo
            .find_by_id(id)
            .await?
            .ok_or(WorkOrderException::WorkOrderNotFound { id })?;

        let previous_status = work_order.status;
        work_order.status = status;
        work_order.last_modified_time = Utc::now();
        self.work_order_repo.update(&work_order).await?;
        tracing::warn!(%id, from = %previous_status, to = %status, "work order status forced");

        if status != previous_status && status.raises_notification() {
            self.publish_status(&work_order).await?;
        }
        Ok(work_order)
    }

    async fn get(&self, id: Uuid) -> WorkOrderResult<WorkOrder> {
        self.work_order_repo
            .find_by_id(id)
            .await?
            .ok_or(WorkOrderException::WorkOrderNotFound { id })
    }

    async fn list(&self, dealership_id: Uuid) -> WorkOrderResult<Vec<WorkOrder>> {
        Ok(self.work_order_repo.list_by_dealership(dealership_id).await?)
    }

    async fn delete(&self, id: Uuid) -> WorkOrderResult<()> {
        if !self.work_order_repo.delete_by_id(id).await? {
            return Err(WorkOrderException::WorkOrderNotFound { id });
        }
        Ok(())
    }
}

impl WorkOrderServiceImpl {
    /// Copies each requested part into an order line at the current catalog
    /// price plus markup. A part that no longer resolves falls back to the
    /// caller-supplied price, still marked up.
    async fn snapshot_parts(
        &self,
        requested: Vec<RequestedPart>,
        markup_percent: Decimal,
    ) -> WorkOrderResult<Vec<WorkOrderPart>> {
        let mut parts = Vec::with_capacity(requested.len());
        for request in requested {
            let catalog = self.part_repo.find_by_id(request.part_id).await?;
            let (name, base_price) = match catalog {
                Some(part) => (part.name, part.price),
                None => (request.name, request.unit_price),
            };
            parts.push(WorkOrderPart {
                part_id: request.part_id,
                name,
                unit_price: pricing::apply_markup(base_price, markup_percent),
                quantity: request.quantity,
            });
        }
        Ok(parts)
    }

    async fn publish_status(&self, work_order: &WorkOrder) -> anyhow::Result<()> {
        self.status_mq_producer
            .send_object(
                &StatusChangeMsg {
                    work_order_id: work_order.id,
                    dealership_id: work_order.dealership_id,
                    technician_id: work_order.technician_id,
                    status: work_order.status,
                },
                Some(&self.status_mq_topic),
            )
            .await
    }
}
