use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use domain_work_order::model::vo::DeliveryMethod;

use crate::exception::NotifyResult;

/// What the caller gets back from a send. Token issuance is committed even
/// when delivery fails; the warning carries the delivery outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReceipt {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub delivery_warning: Option<String>,
}

#[async_trait]
pub trait ApprovalDispatchService: Send + Sync {
    /// Issues an approval token and sends the customer the approval link via
    /// the requested channel.
    async fn send_for_approval(
        &self,
        work_order_id: Uuid,
        method: DeliveryMethod,
    ) -> NotifyResult<DispatchReceipt>;
}
