pub mod api;
pub mod config;
pub mod infrastructure;
pub mod server;
pub mod telemetry;
