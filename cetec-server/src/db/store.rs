//! Storage seam used by the HTTP layer
//!
//! Handlers only see this trait, so tests can swap in a store that fails
//! on demand.

use async_trait::async_trait;

use super::error::{CreatePersonError, StoreError};
use super::repos::{NewPerson, PersonProfile};

#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Load the joined person/phone/address row for `person_id`.
    async fn fetch_profile(&self, person_id: i64) -> Result<PersonProfile, StoreError>;

    /// Insert a person with one phone number and one address, atomically.
    async fn create_with_address(&self, person: &NewPerson) -> Result<(), CreatePersonError>;
}
