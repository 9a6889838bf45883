//! Flutter-facing bindings for the life dashboard core.

pub mod api;
