//! Core types and trait definitions for the Carnet contact service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod contact;
pub mod error;
pub mod store;
pub mod validate;

pub use contact::{Contact, ContactInput, NewContact};
pub use error::{Error, Result};
pub use validate::Violation;
