//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`time::current_timestamp`]: millisecond wall clock used for audit fields

pub mod error;
pub mod time;
