//! Core domain logic for the shelter animals app.
//! This crate owns the on-device store, the one-time seed and the animal list.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod repo;
pub mod seed;
pub mod service;

pub use config::ShelterConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::animal::{
    Animal, AnimalId, AnimalRecord, Cat, CatAndAnimal, CatRecord, Dog, DogAndAnimal, DogRecord,
    HairType, ModelValidationError, Species, SCORE_MAX, SCORE_MIN,
};
pub use prefs::{PreferenceStore, Preferences, PrefsError};
pub use repo::animal_repo::{
    AnimalRepository, RepoError, RepoResult, SqliteAnimalRepository,
};
pub use seed::{seed_database, SeedError, SeedOutcome, SEED_ANIMAL_COUNT};
pub use service::animal_service::AnimalService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
