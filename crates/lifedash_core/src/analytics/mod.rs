//! Dashboard analytics over caller-supplied snapshots.
//!
//! # Responsibility
//! - Turn caller-supplied records (time blocks, budgets, expenses, mood
//!   check-ins, satisfaction scores, milestones) into dashboard aggregates.
//! - Stay free of UI concerns (colors and labels live on the enums).

pub mod finance;
pub mod milestones;
pub mod time_block;
pub mod wellbeing;
