use std::sync::Arc;

use architecture::{
    message_queue::MessageQueueProducerTemplate, repository::ReadOnlyRepository,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use domain_work_order::{
    exception::{WorkOrderException, WorkOrderResult},
    model::{
        entity::{
            approval_log::ApprovalAction,
            work_order::{WorkOrder, WorkOrderStatus},
            ApprovalLog,
        },
        vo::{
            msg::StatusChangeMsg, CustomerDecision, DeliveryMethod, IssuedApproval, RequesterMeta,
            TokenValidation,
        },
    },
    repository::{ApprovalLogRepo, CustomerDecisionUpdate, WorkOrderRepo},
    service::ApprovalService,
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(typed_builder::TypedBuilder)]
pub struct ApprovalServiceImpl {
    work_order_repo: Arc<dyn WorkOrderRepo>,
    approval_log_repo: Arc<dyn ApprovalLogRepo>,
    status_mq_producer: Arc<dyn MessageQueueProducerTemplate<StatusChangeMsg>>,
    status_mq_topic: String,
}

#[async_trait]
impl ApprovalService for ApprovalServiceImpl {
    async fn issue(
        &self,
        work_order_id: Uuid,
        method: DeliveryMethod,
    ) -> WorkOrderResult<IssuedApproval> {
        self.work_order_repo
            .find_by_id(work_order_id)
            .await?
            .ok_or(WorkOrderException::WorkOrderNotFound { id: work_order_id })?;

        // Uuid::new_v4 draws from the OS CSPRNG; the token is unguessable
        // and globally unique.
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let expires_at = now + Duration::days(TOKEN_TTL_DAYS);

        self.work_order_repo
            .set_approval_token(work_order_id, &token, expires_at)
            .await?;
        self.approval_log_repo
            .append(&ApprovalLog::sent(work_order_id, method, now))
            .await?;
        tracing::info!(%work_order_id, %method, "approval token issued");

        Ok(IssuedApproval { token, expires_at })
    }

    async fn resolve(
        &self,
        token: &str,
        viewer: Option<RequesterMeta>,
    ) -> WorkOrderResult<WorkOrder> {
        let work_order = self
            .work_order_repo
            .find_by_approval_token(token)
            .await?
            .ok_or(WorkOrderException::TokenNotFound)?;

        if let Some(meta) = viewer {
            self.approval_log_repo
                .append(&ApprovalLog::viewed(work_order.id, meta, Utc::now()))
                .await?;
        }
        Ok(work_order)
    }

    async fn validate(&self, token: &str) -> WorkOrderResult<TokenValidation> {
        let Some(work_order) = self.work_order_repo.find_by_approval_token(token).await? else {
            return Ok(TokenValidation::NotFound);
        };
        Ok(match Self::probe(&work_order) {
            Ok(()) => TokenValidation::Valid,
            Err(WorkOrderException::TokenExpired { .. }) => TokenValidation::Expired,
            Err(WorkOrderException::AlreadyProcessed) => TokenValidation::AlreadyProcessed,
            Err(e) => return Err(e),
        })
    }

    async fn finalize(
        &self,
        token: &str,
        decision: CustomerDecision,
        notes: Option<String>,
        meta: RequesterMeta,
    ) -> WorkOrderResult<WorkOrderStatus> {
        let work_order = self
            .work_order_repo
            .find_by_approval_token(token)
            .await?
            .ok_or(WorkOrderException::TokenNotFound)?;
        Self::probe(&work_order)?;

        let (status, action) = match decision {
            CustomerDecision::Approve => (WorkOrderStatus::CustomerApproved, ApprovalAction::Approved),
            CustomerDecision::Reject => (WorkOrderStatus::CustomerRejected, ApprovalAction::Rejected),
        };

        let now = Utc::now();
        let applied = self
            .work_order_repo
            .finalize_customer_decision(CustomerDecisionUpdate {
                work_order_id: work_order.id,
                status,
                customer_notes: notes.clone(),
                decided_at: now,
            })
            .await?;

        if !applied {
            // The guard did not match: a concurrent finalize won the race, or
            // the row changed under us some other way.
            let current = self.work_order_repo.find_by_approval_token(token).await?;
            return Err(match current {
                Some(order) if order.status.is_customer_decided() => {
                    WorkOrderException::AlreadyProcessed
                }
                Some(_) => WorkOrderException::ConcurrentUpdate,
                None => WorkOrderException::TokenNotFound,
            });
        }

        self.approval_log_repo
            .append(&ApprovalLog::decided(work_order.id, action, meta, notes, now))
            .await?;
        self.status_mq_producer
            .send_object(
                &StatusChangeMsg {
                    work_order_id: work_order.id,
                    dealership_id: work_order.dealership_id,
                    technician_id: work_order.technician_id,
                    status,
                },
                Some(&self.status_mq_topic),
            )
            .await?;
        tracing::info!(work_order_id = %work_order.id, %status, "customer decision recorded");

        Ok(status)
    }
}

impl ApprovalServiceImpl {
    /// Expiry wins over already-processed, matching the customer-facing
    /// messaging order.
    fn probe(work_order: &WorkOrder) -> WorkOrderResult<()> {
        let expired_at = work_order
            .approval_token_expires_at
            .ok_or(WorkOrderException::TokenNotFound)?;
        if Utc::now() > expired_at {
            return Err(WorkOrderException::TokenExpired { expired_at });
        }
        if work_order.status.is_customer_decided() {
            return Err(WorkOrderException::AlreadyProcessed);
        }
        Ok(())
    }
}
