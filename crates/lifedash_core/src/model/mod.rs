//! Domain model for dashboard records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep enumerated fields as closed types, parsed once at the boundary.
//!
//! # Invariants
//! - Every time block is identified by a stable `TimeBlockId`.
//! - Domain, block type and priority never travel as free-form strings
//!   past the parse functions in [`domain`].
//!
//! # See also
//! - `crate::analytics::time_block`

pub mod domain;
pub mod skill;
pub mod time_block;
