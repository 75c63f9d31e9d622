//! Flutter-facing bindings for the shelter animals core.

pub mod api;
