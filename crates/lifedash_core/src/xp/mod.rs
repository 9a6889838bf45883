//! Experience points and leveling.
//!
//! # Responsibility
//! - Apply XP awards per life domain and derive levels.
//! - Emit notification values instead of performing UI side effects.
//!
//! # Invariants
//! - One ledger per session; no process-global XP state.

pub mod ledger;
pub mod notification;
