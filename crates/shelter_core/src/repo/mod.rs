//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/seed orchestration.
//!
//! # Invariants
//! - Repository writes must validate rows before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `SpeciesConflict`)
//!   in addition to DB transport errors.

pub mod animal_repo;
