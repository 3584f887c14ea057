use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use domain_work_order::{
    exception::WorkOrderResult,
    model::vo::MonthlyRevenue,
    repository::WorkOrderRepo,
    service::ReportService,
};

#[derive(typed_builder::TypedBuilder)]
pub struct ReportServiceImpl {
    work_order_repo: Arc<dyn WorkOrderRepo>,
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn revenue_by_month(
        &self,
        dealership_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> WorkOrderResult<Vec<MonthlyRevenue>> {
        let completed = self
            .work_order_repo
            .list_completed_between(dealership_id, from, to)
            .await?;

        let mut months: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
        for order in completed {
            let stamp = order.last_modified_time;
            let key = format!("{:04}-{:02}", stamp.year(), stamp.month());
            let entry = months.entry(key).or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += order.total_estimate;
        }

        Ok(months
            .into_iter()
            .map(|(month, (order_count, revenue))| MonthlyRevenue {
                month,
                order_count,
                revenue,
            })
            .collect())
    }
}
