use actix_web::{
    delete, get, patch, post,
    web::{Data, Json, Path},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use architecture::repository::{MutableRepository, ReadOnlyRepository};
use domain_account::policy::{authorize, Capability};
use domain_work_order::{
    exception::WorkOrderException, model::entity::Part, repository::PartRepo,
};

use crate::api::auth::{caller_profile, AuthenticatedUser};
use crate::api::response::{success, ApiResult};
use crate::infrastructure::ServiceProvider;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPart {
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub in_stock_qty: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub in_stock_qty: Option<i32>,
}

#[tracing::instrument(skip(sp))]
#[get("/parts")]
pub async fn list_parts(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<Part>> {
    let caller = caller_profile(&sp, &user).await?;
    Ok(Json(
        sp.part_repo.list_by_dealership(caller.dealership_id).await?,
    ))
}

#[tracing::instrument(skip(sp, request))]
#[post("/parts")]
pub async fn create_part(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    request: Json<NewPart>,
) -> ApiResult<Part> {
    let caller = caller_profile(&sp, &user).await?;
    authorize(&caller, caller.dealership_id, Capability::ManageCatalog)?;
    let request = request.into_inner();
    let part = Part {
        id: Uuid::new_v4(),
        dealership_id: caller.dealership_id,
        name: request.name,
        sku: request.sku,
        description: request.description,
        price: request.price,
        in_stock_qty: request.in_stock_qty,
    };
    sp.part_repo.insert(&part).await?;
    Ok(Json(part))
}

#[tracing::instrument(skip(sp, request))]
#[patch("/parts/{id}")]
pub async fn update_part(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
    request: Json<PartPatch>,
) -> ApiResult<Part> {
    let caller = caller_profile(&sp, &user).await?;
    let mut part = sp
        .part_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::PartNotFound { id: *id })?;
    authorize(&caller, part.dealership_id, Capability::ManageCatalog)?;

    let request = request.into_inner();
    if let Some(name) = request.name {
        part.name = name;
    }
    if let Some(sku) = request.sku {
        part.sku = Some(sku);
    }
    if let Some(description) = request.description {
        part.description = Some(description);
    }
    if let Some(price) = request.price {
        part.price = price;
    }
    if let Some(in_stock_qty) = request.in_stock_qty {
        part.in_stock_qty = in_stock_qty;
    }
    sp.part_repo.update(&part).await?;
    Ok(Json(part))
}

#[tracing::instrument(skip(sp))]
#[delete("/parts/{id}")]
pub async fn delete_part(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<Value> {
    let caller = caller_profile(&sp, &user).await?;
    let part = sp
        .part_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::PartNotFound { id: *id })?;
    authorize(&caller, part.dealership_id, Capability::ManageCatalog)?;
    sp.part_repo.delete_by_id(*id).await?;
    Ok(success())
}
