use std::sync::Arc;

use architecture::repository::ReadOnlyRepository;
use async_trait::async_trait;
use uuid::Uuid;

use domain_account::repository::DealershipRepo;
use domain_notify::{
    exception::{NotifyException, NotifyResult},
    service::{ApprovalDispatchService, DispatchReceipt, EmailMessage, EmailSender, SmsSender},
};
use domain_work_order::{
    exception::WorkOrderException,
    model::vo::DeliveryMethod,
    repository::{CustomerRepo, RvRepo, WorkOrderRepo},
    service::ApprovalService,
};

use crate::template;

#[derive(typed_builder::TypedBuilder)]
pub struct ApprovalDispatchServiceImpl {
    approval_service: Arc<dyn ApprovalService>,
    work_order_repo: Arc<dyn WorkOrderRepo>,
    customer_repo: Arc<dyn CustomerRepo>,
    rv_repo: Arc<dyn RvRepo>,
    dealership_repo: Arc<dyn DealershipRepo>,
    sms_sender: Arc<dyn SmsSender>,
    email_sender: Arc<dyn EmailSender>,
    /// Public site origin the approval links point at.
    base_url: String,
}

#[async_trait]
impl ApprovalDispatchService for ApprovalDispatchServiceImpl {
    async fn send_for_approval(
        &self,
        work_order_id: Uuid,
        method: DeliveryMethod,
    ) -> NotifyResult<DispatchReceipt> {
        let work_order = self
            .work_order_repo
            .find_by_id(work_order_id)
            .await
            .map_err(WorkOrderException::from)?
            .ok_or(WorkOrderException::WorkOrderNotFound { id: work_order_id })?;
        let customer = self
            .customer_repo
            .find_by_id(work_order.customer_id)
            .await
            .map_err(WorkOrderException::from)?
            .ok_or(WorkOrderException::CustomerNotFound {
                id: work_order.customer_id,
            })?;
        let rv = self
            .rv_repo
            .find_by_id(work_order.rv_id)
            .await
            .map_err(WorkOrderException::from)?
            .ok_or(WorkOrderException::RvNotFound {
                id: work_order.rv_id,
            })?;
        let dealership = self
            .dealership_repo
            .find_by_id(work_order.dealership_id)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("there is no dealership with id: {}", work_order.dealership_id)
            })?;

        let issued = self.approval_service.issue(work_order_id, method).await?;
        let approval_link = format!(
            "{}/approve/{}",
            self.base_url.trim_end_matches('/'),
            issued.token
        );

        // The token and status change are committed; from here on a failure
        // only downgrades the receipt, it never rolls anything back.
        let delivery = match method {
            DeliveryMethod::Sms => {
                if customer.phone.trim().is_empty() {
                    Err(NotifyException::MissingContact { method })
                } else {
                    let body = template::estimate_sms_body(&dealership.name, &approval_link);
                    self.sms_sender.send(&customer.phone, &body).await
                }
            }
            DeliveryMethod::Email => {
                if customer.email.trim().is_empty() {
                    Err(NotifyException::MissingContact { method })
                } else {
                    let html_body = template::render_estimate_email(&template::EstimateEmail {
                        customer_name: &customer.name,
                        dealership_name: &dealership.name,
                        rv_info: &rv.display_name(),
                        currency_symbol: &dealership.currency_symbol,
                        total_estimate: work_order.total_estimate,
                        approval_link: &approval_link,
                    })?;
                    self.email_sender
                        .send(&EmailMessage {
                            to: customer.email.clone(),
                            subject: template::estimate_email_subject(&dealership.name),
                            html_body,
                        })
                        .await
                }
            }
        };

        let delivery_warning = match delivery {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(%work_order_id, %method, error = %e, "approval delivery failed, token stays issued");
                Some(e.to_string())
            }
        };

        Ok(DispatchReceipt {
            token: issued.token,
            expires_at: issued.expires_at,
            delivery_warning,
        })
    }
}
