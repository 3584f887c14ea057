use std::sync::Arc;

use architecture::repository::MutableRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use domain_account::{model::entity::profile::Role, repository::ProfileRepo};
use domain_notify::{
    model::entity::notification::{Notification, NotificationKind},
    repository::NotificationRepo,
    service::StatusNotifyService,
};
use domain_work_order::model::{entity::work_order::WorkOrderStatus, vo::msg::StatusChangeMsg};

/// Fans a lifecycle status change out as notifications: review-stage events
/// go to the dealership's owners and managers, review outcomes go to the
/// assigned technician.
#[derive(typed_builder::TypedBuilder)]
pub struct StatusNotifyServiceImpl {
    profile_repo: Arc<dyn ProfileRepo>,
    notification_repo: Arc<dyn NotificationRepo>,
}

#[async_trait]
impl StatusNotifyService for StatusNotifyServiceImpl {
    async fn handle(&self, msg: StatusChangeMsg) -> anyhow::Result<()> {
        let (kind, title, message) = match msg.status {
            WorkOrderStatus::Submitted => (
                NotificationKind::WorkOrderSubmitted,
                "Work order submitted",
                "A work order was submitted and is waiting for review.",
            ),
            WorkOrderStatus::Approved => (
                NotificationKind::WorkOrderApproved,
                "Work order approved",
                "Your work order was approved by management.",
            ),
            WorkOrderStatus::Rejected => (
                NotificationKind::WorkOrderRejected,
                "Work order rejected",
                "Your work order was rejected by management.",
            ),
            WorkOrderStatus::CustomerApproved => (
                NotificationKind::CustomerApproved,
                "Customer approved the estimate",
                "The customer approved the service estimate.",
            ),
            WorkOrderStatus::CustomerRejected => (
                NotificationKind::CustomerRejected,
                "Customer declined the estimate",
                "The customer declined the service estimate.",
            ),
            // Other states raise nothing.
            _ => return Ok(()),
        };

        let recipients: Vec<Uuid> = match msg.status {
            WorkOrderStatus::Approved | WorkOrderStatus::Rejected => {
                // The review outcome only concerns the assigned technician.
                msg.technician_id.into_iter().collect()
            }
            _ => self
                .profile_repo
                .list_active_in_roles(msg.dealership_id, &[Role::Owner, Role::Manager])
                .await?
                .into_iter()
                .map(|profile| profile.id)
                .collect(),
        };

        let now = Utc::now();
        for user_id in recipients {
            self.notification_repo
                .insert(&Notification {
                    id: Uuid::new_v4(),
                    user_id,
                    dealership_id: msg.dealership_id,
                    title: title.to_string(),
                    message: message.to_string(),
                    kind,
                    work_order_id: Some(msg.work_order_id),
                    read: false,
                    created_time: now,
                })
                .await?;
        }
        Ok(())
    }
}
