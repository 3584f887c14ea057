pub mod dealership;
pub mod profile;

#[rustfmt::skip]
pub use {
    dealership::Dealership,
    profile::Profile,
};
