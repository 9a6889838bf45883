//! Core use-case services.
//!
//! # Responsibility
//! - Own session state (planner list, skill tree, XP ledger) behind
//!   use-case level APIs.
//! - Keep UI/FFI layers decoupled from model invariants.

pub mod dashboard_service;
pub mod planner_service;
pub mod skill_tree_service;
