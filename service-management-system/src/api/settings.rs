use actix_web::{
    get, patch,
    web::{Data, Json},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use architecture::repository::{MutableRepository, ReadOnlyRepository};
use domain_account::{
    exception::AccountException,
    model::entity::Dealership,
    policy::{authorize, Capability},
};

use crate::api::auth::{caller_profile, AuthenticatedUser};
use crate::api::response::ApiResult;
use crate::infrastructure::ServiceProvider;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub default_labor_rate: Option<Decimal>,
    pub currency_symbol: Option<String>,
    pub default_terms: Option<String>,
    pub parts_markup_percent: Option<Decimal>,
    pub technicians_see_pricing: Option<bool>,
}

#[tracing::instrument(skip(sp))]
#[get("/settings")]
pub async fn get_settings(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<Dealership> {
    let caller = caller_profile(&sp, &user).await?;
    let dealership = sp
        .dealership_repo
        .find_by_id(caller.dealership_id)
        .await?
        .ok_or(AccountException::DealershipNotFound {
            id: caller.dealership_id,
        })?;
    Ok(Json(dealership))
}

#[tracing::instrument(skip(sp, request))]
#[patch("/settings")]
pub async fn update_settings(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    request: Json<SettingsPatch>,
) -> ApiResult<Dealership> {
    let caller = caller_profile(&sp, &user).await?;
    authorize(&caller, caller.dealership_id, Capability::ManageSettings)?;
    let mut dealership = sp
        .dealership_repo
        .find_by_id(caller.dealership_id)
        .await?
        .ok_or(AccountException::DealershipNotFound {
            id: caller.dealership_id,
        })?;

    let request = request.into_inner();
    if let Some(name) = request.name {
        dealership.name = name;
    }
    if let Some(phone) = request.phone {
        dealership.phone = Some(phone);
    }
    if let Some(email) = request.email {
        dealership.email = Some(email);
    }
    if let Some(default_labor_rate) = request.default_labor_rate {
        dealership.default_labor_rate = default_labor_rate;
    }
    if let Some(currency_symbol) = request.currency_symbol {
        dealership.currency_symbol = currency_symbol;
    }
    if let Some(default_terms) = request.default_terms {
        dealership.default_terms = Some(default_terms);
    }
    if let Some(parts_markup_percent) = request.parts_markup_percent {
        dealership.parts_markup_percent = parts_markup_percent;
    }
    if let Some(technicians_see_pricing) = request.technicians_see_pricing {
        dealership.technicians_see_pricing = technicians_see_pricing;
    }
    sp.dealership_repo.update(&dealership).await?;
    Ok(Json(dealership))
}
