//! EDRR methodology domain
//!
//! Every reasoning session walks the four EDRR phases strictly forward:
//!
//! ```text
//! EXPAND ──▶ DIFFERENTIATE ──▶ REFINE ──▶ RETROSPECT
//!   ▲                                        │
//!   └──────────── next submitted change ─────┘
//! ```
//!
//! Each phase has its own WSDE role ordering ([`Role::order_for`]) and
//! expertise keywords used to rank agents for that phase.

pub mod assignment;
pub mod phase;
pub mod role;
pub mod work_item;

pub use assignment::{AgentProfile, RoleAssignment};
pub use phase::EdrrPhase;
pub use role::Role;
pub use work_item::WorkItem;
