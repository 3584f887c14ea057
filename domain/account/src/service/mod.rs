mod identity;
mod provisioning;

#[rustfmt::skip]
pub use {
    identity::IdentityService,
    provisioning::{NewDealershipOwner, NewUser, ProvisionedOwner, ProvisioningService},
};
