//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into list/detail use cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod animal_service;
