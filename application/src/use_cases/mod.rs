//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod coordinate_team;
pub mod dialectical_reasoning;
pub mod edrr_session;
pub mod run_edrr;
pub mod tiered_memory;
