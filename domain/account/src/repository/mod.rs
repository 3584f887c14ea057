mod dealership;
mod profile;

#[rustfmt::skip]
pub use {
    dealership::DealershipRepo,
    profile::ProfileRepo,
};
