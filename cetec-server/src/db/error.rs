//! Error types for the data access layer
//!
//! Reads and writes fail differently: a read either finds the joined row
//! set or it doesn't, while a write reports which step of the transaction
//! broke.

use std::fmt;

use thiserror::Error;

/// Error returned by profile reads.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: person '{id}'")]
    NotFound { id: i64 },
}

/// A step of the person creation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStage {
    Begin,
    InsertPerson,
    PersonId,
    InsertPhone,
    InsertAddress,
    AddressId,
    LinkAddress,
    Commit,
}

impl CreateStage {
    /// Client-facing message for a failure at this stage.
    pub fn message(self) -> &'static str {
        match self {
            Self::Begin => "Error starting transaction",
            Self::InsertPerson => "Error inserting person",
            Self::PersonId => "Error getting person ID",
            Self::InsertPhone => "Error inserting phone number",
            Self::InsertAddress => "Error inserting address",
            Self::AddressId => "Error getting address ID",
            Self::LinkAddress => "Error linking person to address",
            Self::Commit => "Error committing transaction",
        }
    }
}

impl fmt::Display for CreateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Person creation failed; nothing from the attempt was committed.
#[derive(Debug, Error)]
#[error("{stage}")]
pub struct CreatePersonError {
    pub stage: CreateStage,
    #[source]
    pub source: sqlx::Error,
}

impl CreatePersonError {
    pub fn new(stage: CreateStage, source: sqlx::Error) -> Self {
        Self { stage, source }
    }
}

/// Tag a sqlx result with the creation stage it belongs to.
pub(crate) trait AtStage<T> {
    fn at(self, stage: CreateStage) -> Result<T, CreatePersonError>;
}

impl<T> AtStage<T> for Result<T, sqlx::Error> {
    fn at(self, stage: CreateStage) -> Result<T, CreatePersonError> {
        self.map_err(|e| CreatePersonError::new(stage, e))
    }
}
