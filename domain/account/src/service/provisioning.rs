use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::AccountResult;
use crate::model::entity::Profile;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDealershipOwner {
    pub dealership_name: String,
    pub owner_name: String,
    pub email: String,
    pub password: String,
}

/// The role arrives as a raw string so an unknown value is reported as a
/// validation failure instead of a deserialization error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub dealership_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedOwner {
    pub dealership_id: Uuid,
    pub user: Profile,
}

#[async_trait]
pub trait ProvisioningService: Send + Sync {
    /// Creates dealership, auth identity and owner profile as one saga.
    /// A failing step deletes everything the earlier steps created.
    async fn create_dealership_owner(
        &self,
        request: NewDealershipOwner,
    ) -> AccountResult<ProvisionedOwner>;

    /// Creates a staff account inside the caller's dealership. The caller
    /// must resolve to an active owner profile of the target dealership.
    async fn create_user(&self, request: NewUser, requesting_identity: Uuid)
        -> AccountResult<Profile>;
}
