use std::sync::Arc;

use architecture::repository::{MutableRepository, ReadOnlyRepository};
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use domain_account::{
    exception::{AccountException, AccountResult},
    model::entity::{
        profile::{Profile, ProfileStatus, Role},
        Dealership,
    },
    policy::{authorize, Capability},
    repository::{DealershipRepo, ProfileRepo},
    service::{IdentityService, NewDealershipOwner, NewUser, ProvisionedOwner, ProvisioningService},
};

const MIN_PASSWORD_LEN: usize = 6;

/// Multi-step creation against stores that share no transaction. Each step
/// records its compensation; a failing step unwinds everything recorded so
/// far, newest first. A failed compensation is logged, never escalated: the
/// caller always sees the step's original error.
enum Compensation {
    DeleteDealership(Uuid),
    DeleteIdentity(Uuid),
}

#[derive(typed_builder::TypedBuilder)]
pub struct ProvisioningServiceImpl {
    dealership_repo: Arc<dyn DealershipRepo>,
    profile_repo: Arc<dyn ProfileRepo>,
    identity_service: Arc<dyn IdentityService>,
}

#[async_trait]
impl ProvisioningService for ProvisioningServiceImpl {
    async fn create_dealership_owner(
        &self,
        request: NewDealershipOwner,
    ) -> AccountResult<ProvisionedOwner> {
        required(&request.dealership_name, "dealershipName")?;
        required(&request.owner_name, "ownerName")?;
        required(&request.email, "email")?;
        check_password(&request.password)?;

        let mut done = Vec::new();

        // Step 1: the dealership row, with the signup defaults.
        let dealership = Dealership {
            id: Uuid::new_v4(),
            name: request.dealership_name,
            phone: None,
            email: None,
            default_labor_rate: Decimal::from(85),
            currency_symbol: "$".to_string(),
            default_terms: None,
            parts_markup_percent: Decimal::ZERO,
            technicians_see_pricing: false,
        };
        self.dealership_repo.insert(&dealership).await?;
        done.push(Compensation::DeleteDealership(dealership.id));

        // Step 2: the auth identity.
        let identity_id = match self
            .identity_service
            .create_identity(&request.email, &request.password)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                self.compensate(&done).await;
                return Err(e);
            }
        };
        done.push(Compensation::DeleteIdentity(identity_id));

        // Step 3: the owner profile linking them.
        let profile = Profile {
            id: identity_id,
            dealership_id: dealership.id,
            name: request.owner_name,
            email: request.email,
            role: Role::Owner,
            status: ProfileStatus::Active,
        };
        if let Err(e) = self.profile_repo.insert(&profile).await {
            self.compensate(&done).await;
            return Err(e.into());
        }

        tracing::info!(dealership_id = %dealership.id, owner = %profile.id, "dealership owner provisioned");
        Ok(ProvisionedOwner {
            dealership_id: dealership.id,
            user: profile,
        })
    }

    async fn create_user(
        &self,
        request: NewUser,
        requesting_identity: Uuid,
    ) -> AccountResult<Profile> {
        required(&request.email, "email")?;
        required(&request.name, "name")?;
        check_password(&request.password)?;
        let role: Role = request
            .role
            .parse()
            .map_err(|_| AccountException::InvalidRole {
                value: request.role.clone(),
            })?;

        let caller = self
            .profile_repo
            .find_by_id(requesting_identity)
            .await?
            .ok_or(AccountException::CallerUnresolved)?;
        authorize(&caller, request.dealership_id, Capability::ManageUsers)?;

        let identity_id = self
            .identity_service
            .create_identity(&request.email, &request.password)
            .await?;

        let profile = Profile {
            id: identity_id,
            dealership_id: request.dealership_id,
            name: request.name,
            email: request.email,
            role,
            status: ProfileStatus::Active,
        };
        if let Err(e) = self.profile_repo.insert(&profile).await {
            self.compensate(&[Compensation::DeleteIdentity(identity_id)]).await;
            return Err(e.into());
        }

        tracing::info!(user = %profile.id, %role, "staff account provisioned");
        Ok(profile)
    }
}

impl ProvisioningServiceImpl {
    /// Runs compensations newest first, best effort.
    async fn compensate(&self, done: &[Compensation]) {
        for step in done.iter().rev() {
            let result = match step {
                Compensation::DeleteDealership(id) => {
                    tracing::warn!(dealership_id = %id, "rolling back dealership creation");
                    self.dealership_repo.delete_by_id(*id).await.map(|_| ())
                }
                Compensation::DeleteIdentity(id) => {
                    tracing::warn!(identity_id = %id, "rolling back identity creation");
                    self.identity_service
                        .delete_identity(*id)
                        .await
                        .map_err(anyhow::Error::new)
                }
            };
            if let Err(e) = result {
                tracing::error!(error = %e, "compensating delete failed, leaving an orphaned record");
            }
        }
    }
}

fn required(value: &str, field: &'static str) -> AccountResult<()> {
    if value.trim().is_empty() {
        return Err(AccountException::MissingField { field });
    }
    Ok(())
}

fn check_password(password: &str) -> AccountResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountException::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
