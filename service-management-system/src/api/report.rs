use actix_web::{
    get,
    web::{Data, Json, Query},
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use domain_account::policy::{authorize, Capability};
use domain_work_order::{model::vo::MonthlyRevenue, service::ReportService};

use crate::api::auth::{caller_profile, AuthenticatedUser};
use crate::api::response::ApiResult;
use crate::infrastructure::ServiceProvider;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Completed-order revenue grouped by month; defaults to the last year.
#[tracing::instrument(skip(sp))]
#[get("/reports/revenue")]
pub async fn revenue_report(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    query: Query<RevenueQuery>,
) -> ApiResult<Vec<MonthlyRevenue>> {
    let caller = caller_profile(&sp, &user).await?;
    authorize(&caller, caller.dealership_id, Capability::ViewPricing)?;

    let to = query.to.unwrap_or_else(Utc::now);
    let from = query.from.unwrap_or(to - Duration::days(365));
    Ok(Json(
        sp.report_service.revenue_by_month(caller.dealership_id, from, to).await?,
    ))
}
