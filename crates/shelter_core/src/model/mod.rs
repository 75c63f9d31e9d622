//! Shelter animal domain model.
//!
//! # Responsibility
//! - Define persisted row shapes and the `Animal` sum type used by views.
//!
//! # Invariants
//! - Every Dog/Cat row has exactly one owning Animal row.
//! - An Animal row has at most one child row across both species tables.

pub mod animal;
