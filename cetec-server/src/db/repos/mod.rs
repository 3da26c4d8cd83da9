//! Repository implementations for database access

pub mod persons;

pub use persons::{NewPerson, PersonProfile, PersonRepo};
