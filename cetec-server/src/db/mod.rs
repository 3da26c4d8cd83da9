//! Database layer - connection pool and the person repository
//!
//! - One shared `AnyPool`, created at startup and handed to the HTTP state
//! - Reads are a single JOIN query
//! - Writes that span tables run inside one transaction

pub mod error;
pub mod pool;
pub mod repos;
pub mod store;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use error::{CreatePersonError, CreateStage, StoreError};
pub use store::PersonStore;
