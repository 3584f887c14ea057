use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::exception::WorkOrderResult;
use crate::model::vo::MonthlyRevenue;

#[async_trait]
pub trait ReportService: Send + Sync {
    /// Revenue of completed orders grouped by month, oldest first.
    async fn revenue_by_month(
        &self,
        dealership_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> WorkOrderResult<Vec<MonthlyRevenue>>;
}
