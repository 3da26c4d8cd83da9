//! cetec-server: person profile HTTP service
//!
//! Reads a person's joined profile (name, age, phone, address) and creates
//! a person with a phone number and an address in one transaction.

pub mod config;
pub mod db;
pub mod http;
pub mod tracing_setup;

pub use db::{PersonRepo, PersonStore};
pub use http::{build_router, run_server, AppState, ServerConfig};
