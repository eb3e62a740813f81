//! Requirement change domain
//!
//! A [`RequirementChange`] is the unit of work submitted to the council.
//! It is created by the caller and treated as read-only by every layer.

pub mod entities;

pub use entities::{ChangeType, RequirementChange};
