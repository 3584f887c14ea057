use actix_web::{
    delete, get, patch, post,
    web::{Data, Json, Path},
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use domain_account::policy::{authorize, Capability};
use domain_notify::service::{ApprovalDispatchService, DispatchReceipt};
use domain_work_order::{
    model::{
        entity::work_order::{WorkOrder, WorkOrderStatus},
        vo::{DeliveryMethod, NewWorkOrder, WorkOrderPatch},
    },
    service::WorkOrderService,
};

use crate::api::auth::{caller_profile, AuthenticatedUser};
use crate::api::response::{success, ApiResult};
use crate::infrastructure::ServiceProvider;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceStatusRequest {
    pub status: WorkOrderStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendApprovalRequest {
    pub method: DeliveryMethod,
}

#[tracing::instrument(skip(sp, request))]
#[post("/work-orders")]
pub async fn create_work_order(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    request: Json<NewWorkOrder>,
) -> ApiResult<WorkOrder> {
    let caller = caller_profile(&sp, &user).await?;
    authorize(&caller, caller.dealership_id, Capability::ManageWorkOrders)?;
    let order = sp
        .work_order_service
        .create(caller.dealership_id, request.into_inner())
        .await?;
    Ok(Json(order))
}

#[tracing::instrument(skip(sp))]
#[get("/work-orders")]
pub async fn list_work_orders(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<WorkOrder>> {
    let caller = caller_profile(&sp, &user).await?;
    authorize(&caller, caller.dealership_id, Capability::ManageWorkOrders)?;
    Ok(Json(sp.work_order_service.list(caller.dealership_id).await?))
}

#[tracing::instrument(skip(sp))]
#[get("/work-orders/{id}")]
pub async fn get_work_order(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<WorkOrder> {
    let caller = caller_profile(&sp, &user).await?;
    let order = sp.work_order_service.get(*id).await?;
    authorize(&caller, order.dealership_id, Capability::ManageWorkOrders)?;
    Ok(Json(order))
}

#[tracing::instrument(skip(sp, request))]
#[patch("/work-orders/{id}")]
pub async fn update_work_order(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
    request: Json<WorkOrderPatch>,
) -> ApiResult<WorkOrder> {
    let caller = caller_profile(&sp, &user).await?;
    let order = sp.work_order_service.get(*id).await?;
    authorize(&caller, order.dealership_id, Capability::ManageWorkOrders)?;
    Ok(Json(
        sp.work_order_service.update(*id, request.into_inner()).await?,
    ))
}

/// Trusted override outside the transition table; owners and managers only.
#[tracing::instrument(skip(sp))]
#[post("/work-orders/{id}/status")]
pub async fn force_work_order_status(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
    request: Json<ForceStatusRequest>,
) -> ApiResult<WorkOrder> {
    let caller = caller_profile(&sp, &user).await?;
    let order = sp.work_order_service.get(*id).await?;
    authorize(&caller, order.dealership_id, Capability::ForceWorkOrderStatus)?;
    Ok(Json(
        sp.work_order_service.force_set_status(*id, request.status).await?,
    ))
}

#[tracing::instrument(skip(sp))]
#[delete("/work-orders/{id}")]
pub async fn delete_work_order(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<Value> {
    let caller = caller_profile(&sp, &user).await?;
    let order = sp.work_order_service.get(*id).await?;
    authorize(&caller, order.dealership_id, Capability::ManageWorkOrders)?;
    sp.work_order_service.delete(*id).await?;
    Ok(success())
}

#[tracing::instrument(skip(sp))]
#[post("/work-orders/{id}/send-approval")]
pub async fn send_for_approval(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
    request: Json<SendApprovalRequest>,
) -> ApiResult<DispatchReceipt> {
    let caller = caller_profile(&sp, &user).await?;
    let order = sp.work_order_service.get(*id).await?;
    authorize(&caller, order.dealership_id, Capability::SendApprovalRequests)?;
    Ok(Json(
        sp.approval_dispatch_service.send_for_approval(*id, request.method).await?,
    ))
}
