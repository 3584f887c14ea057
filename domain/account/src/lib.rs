pub mod exception;
#[cfg(feature = "mock")]
pub mod mock;
pub mod model;
pub mod policy;
pub mod repository;
pub mod service;
