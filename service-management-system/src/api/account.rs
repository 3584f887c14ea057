use actix_web::{
    get, post,
    web::{Data, Json},
};

use domain_account::{
    model::entity::Profile,
    repository::ProfileRepo,
    service::{NewDealershipOwner, NewUser, ProvisionedOwner, ProvisioningService},
};

use crate::api::auth::{caller_profile, AuthenticatedUser};
use crate::api::response::ApiResult;
use crate::infrastructure::ServiceProvider;

/// Self-service signup; deliberately unauthenticated.
#[tracing::instrument(skip(sp, request))]
#[post("/provision/dealership-owner")]
pub async fn create_dealership_owner(
    sp: Data<ServiceProvider>,
    request: Json<NewDealershipOwner>,
) -> ApiResult<ProvisionedOwner> {
    Ok(Json(
        sp.provisioning_service.create_dealership_owner(request.into_inner()).await?,
    ))
}

#[tracing::instrument(skip(sp, request))]
#[post("/provision/users")]
pub async fn create_user(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
    request: Json<NewUser>,
) -> ApiResult<Profile> {
    Ok(Json(
        sp.provisioning_service.create_user(request.into_inner(), user.id).await?,
    ))
}

#[tracing::instrument(skip(sp))]
#[get("/profiles")]
pub async fn list_profiles(
    sp: Data<ServiceProvider>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<Profile>> {
    let caller = caller_profile(&sp, &user).await?;
    Ok(Json(
        sp.profile_repo.list_by_dealership(caller.dealership_id).await?,
    ))
}
