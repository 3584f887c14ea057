mod provisioning;

pub use provisioning::ProvisioningServiceImpl;
