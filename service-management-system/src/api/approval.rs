//! Public, unauthenticated customer approval flow. Possession of the token
//! is the only credential.

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    HttpRequest,
};
use serde::{Deserialize, Serialize};

use domain_work_order::{
    model::{
        entity::work_order::{WorkOrder, WorkOrderStatus},
        vo::{CustomerDecision, TokenValidation},
    },
    service::ApprovalService,
};

use crate::api::auth::requester_meta;
use crate::api::response::ApiResult;
use crate::infrastructure::ServiceProvider;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPageView {
    /// Drives the distinct not-found / expired / already-processed
    /// messaging on the page.
    pub state: TokenValidation,
    pub work_order: Option<WorkOrder>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub action: CustomerDecision,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub success: bool,
    pub status: WorkOrderStatus,
}

#[tracing::instrument(skip(sp, req))]
#[get("/approve/{token}")]
pub async fn view_approval(
    sp: Data<ServiceProvider>,
    token: Path<String>,
    req: HttpRequest,
) -> ApiResult<ApprovalPageView> {
    let state = sp.approval_service.validate(&token).await?;
    let work_order = match state {
        TokenValidation::NotFound => None,
        // Only a live view counts as "viewed" in the audit trail.
        TokenValidation::Valid => Some(
            sp.approval_service
                .resolve(&token, Some(requester_meta(&req)))
                .await?,
        ),
        _ => Some(sp.approval_service.resolve(&token, None).await?),
    };
    Ok(Json(ApprovalPageView { state, work_order }))
}

#[tracing::instrument(skip(sp, req, request))]
#[post("/approve/{token}")]
pub async fn decide_approval(
    sp: Data<ServiceProvider>,
    token: Path<String>,
    request: Json<DecisionRequest>,
    req: HttpRequest,
) -> ApiResult<DecisionResponse> {
    let DecisionRequest { action, notes } = request.into_inner();
    let status = sp
        .approval_service
        .finalize(&token, action, notes, requester_meta(&req))
        .await?;
    Ok(Json(DecisionResponse {
        success: true,
        status,
    }))
}
