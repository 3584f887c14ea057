use actix_web::{
    delete, get, patch, post,
    web::{Data, Json, Path},
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use architecture::repository::{MutableRepository, ReadOnlyRepository};
use domain_account::policy::{authorize, Capability};
use domain_work_order::{
    exception::WorkOrderException,
    model::entity::{Customer, Rv},
    repository::{CustomerRepo, RvRepo},
};

use crate::api::auth::{caller_profile, AuthenticatedUser};
use crate::api::response::{success, ApiResult};
use crate::infrastructure::ServiceProvider;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRv {
    pub year: i32,
    pub make: String,
    pub model: String,
    pub vin: String,
    pub nickname: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RvPatch {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub vin: Option<String>,
    pub nickname: Option<String>,
    pub notes: Option<String>,
}

#[tracing::instrument(skip(sp))]
#[get("/customers")]
pub async fn list_customers(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<Customer>> {
    let caller = caller_profile(&sp, &user).await?;
    Ok(Json(
        sp.customer_repo.list_by_dealership(caller.dealership_id).await?,
    ))
}

#[tracing::instrument(skip(sp, request))]
#[post("/customers")]
pub async fn create_customer(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    request: Json<NewCustomer>,
) -> ApiResult<Customer> {
    let caller = caller_profile(&sp, &user).await?;
    authorize(&caller, caller.dealership_id, Capability::ManageCatalog)?;
    let request = request.into_inner();
    let customer = Customer {
        id: Uuid::new_v4(),
        dealership_id: caller.dealership_id,
        name: request.name,
        email: request.email,
        phone: request.phone,
    };
    sp.customer_repo.insert(&customer).await?;
    Ok(Json(customer))
}

#[tracing::instrument(skip(sp))]
#[get("/customers/{id}")]
pub async fn get_customer(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<Customer> {
    let caller = caller_profile(&sp, &user).await?;
    let customer = sp
        .customer_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::CustomerNotFound { id: *id })?;
    authorize(&caller, customer.dealership_id, Capability::ManageWorkOrders)?;
    Ok(Json(customer))
}

#[tracing::instrument(skip(sp, request))]
#[patch("/customers/{id}")]
pub async fn update_customer(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
    request: Json<CustomerPatch>,
) -> ApiResult<Customer> {
    let caller = caller_profile(&sp, &user).await?;
    let mut customer = sp
        .customer_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::CustomerNotFound { id: *id })?;
    authorize(&caller, customer.dealership_id, Capability::ManageCatalog)?;

    let request = request.into_inner();
    if let Some(name) = request.name {
        customer.name = name;
    }
    if let Some(email) = request.email {
        customer.email = email;
    }
    if let Some(phone) = request.phone {
        customer.phone = phone;
    }
    sp.customer_repo.update(&customer).await?;
    Ok(Json(customer))
}

#[tracing::instrument(skip(sp))]
#[delete("/customers/{id}")]
pub async fn delete_customer(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<Value> {
    let caller = caller_profile(&sp, &user).await?;
    let customer = sp
        .customer_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::CustomerNotFound { id: *id })?;
    authorize(&caller, customer.dealership_id, Capability::ManageCatalog)?;
    sp.customer_repo.delete_by_id(*id).await?;
    Ok(success())
}

#[tracing::instrument(skip(sp))]
#[get("/customers/{id}/rvs")]
pub async fn list_customer_rvs(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<Vec<Rv>> {
    let caller = caller_profile(&sp, &user).await?;
    let customer = sp
        .customer_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::CustomerNotFound { id: *id })?;
    authorize(&caller, customer.dealership_id, Capability::ManageWorkOrders)?;
    Ok(Json(sp.rv_repo.list_by_customer(*id).await?))
}

#[tracing::instrument(skip(sp, request))]
#[post("/customers/{id}/rvs")]
pub async fn create_rv(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
    request: Json<NewRv>,
) -> ApiResult<Rv> {
    let caller = caller_profile(&sp, &user).await?;
    let customer = sp
        .customer_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::CustomerNotFound { id: *id })?;
    authorize(&caller, customer.dealership_id, Capability::ManageCatalog)?;

    let request = request.into_inner();
    let rv = Rv {
        id: Uuid::new_v4(),
        customer_id: customer.id,
        year: request.year,
        make: request.make,
        model: request.model,
        vin: request.vin,
        nickname: request.nickname,
        notes: request.notes,
    };
    sp.rv_repo.insert(&rv).await?;
    Ok(Json(rv))
}

#[tracing::instrument(skip(sp, request))]
#[patch("/rvs/{id}")]
pub async fn update_rv(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
    request: Json<RvPatch>,
) -> ApiResult<Rv> {
    let caller = caller_profile(&sp, &user).await?;
    let mut rv = sp
        .rv_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::RvNotFound { id: *id })?;
    let customer = sp
        .customer_repo
        .find_by_id(rv.customer_id)
        .await?
        .ok_or(WorkOrderException::CustomerNotFound { id: rv.customer_id })?;
    authorize(&caller, customer.dealership_id, Capability::ManageCatalog)?;

    let request = request.into_inner();
    if let Some(year) = request.year {
        rv.year = year;
    }
    if let Some(make) = request.make {
        rv.make = make;
    }
    if let Some(model) = request.model {
        rv.model = model;
    }
    if let Some(vin) = request.vin {
        rv.vin = vin;
    }
    if let Some(nickname) = request.nickname {
        rv.nickname = Some(nickname);
    }
    if let Some(notes) = request.notes {
        rv.notes = Some(notes);
    }
    sp.rv_repo.update(&rv).await?;
    Ok(Json(rv))
}

#[tracing::instrument(skip(sp))]
#[delete("/rvs/{id}")]
pub async fn delete_rv(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    id: Path<Uuid>,
) -> ApiResult<Value> {
    let caller = caller_profile(&sp, &user).await?;
    let rv = sp
        .rv_repo
        .find_by_id(*id)
        .await?
        .ok_or(WorkOrderException::RvNotFound { id: *id })?;
    let customer = sp
        .customer_repo
        .find_by_id(rv.customer_id)
        .await?
        .ok_or(WorkOrderException::CustomerNotFound { id: rv.customer_id })?;
    authorize(&caller, customer.dealership_id, Capability::ManageCatalog)?;
    sp.rv_repo.delete_by_id(*id).await?;
    Ok(success())
}
