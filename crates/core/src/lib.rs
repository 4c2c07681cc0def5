//! `eara-core`: shared primitives for the EARA portal access core.
//!
//! This crate contains **pure** building blocks (no IO, no policy).

pub mod error;
pub mod id;

pub use error::CoreError;
pub use id::{CountryId, SubcommitteeId, UserId};
