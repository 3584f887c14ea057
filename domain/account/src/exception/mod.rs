use thiserror::Error;
use uuid::Uuid;

use crate::model::entity::profile::Role;
use crate::policy::Capability;

pub type AccountResult<T> = Result<T, AccountException>;

#[derive(Error, Debug)]
pub enum AccountException {
    #[error("Missing required field: {field}.")]
    MissingField { field: &'static str },

    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    #[error("Invalid role: {value}. Must be owner, manager, or technician.")]
    InvalidRole { value: String },

    #[error("There is no profile with id: {id}.")]
    ProfileNotFound { id: Uuid },

    #[error("There is no dealership with id: {id}.")]
    DealershipNotFound { id: Uuid },

    #[error("Could not verify caller permissions.")]
    CallerUnresolved,

    #[error("The caller profile is inactive.")]
    InactiveProfile,

    #[error("Cannot act on a different dealership.")]
    WrongDealership,

    #[error("Role {role} is not granted the {capability:?} capability.")]
    CapabilityNotGranted { role: Role, capability: Capability },

    #[error("Identity provider call failed (retryable: {retryable}): {source}")]
    IdentityUpstream {
        retryable: bool,
        #[source]
        source: anyhow::Error,
    },

    #[error("Account internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AccountException {
    fn from(e: anyhow::Error) -> Self {
        AccountException::InternalError { source: e }
    }
}
