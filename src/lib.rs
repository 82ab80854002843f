pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod method_override;
pub mod models;
pub mod routes;
pub mod session;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod views;
