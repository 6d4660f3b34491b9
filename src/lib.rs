pub mod client;
pub mod configuration;
pub mod domain;
pub mod form;
pub mod routes;
pub mod signups;
pub mod startup;
pub mod store;
pub mod telemetry;
