//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose store bootstrap and list/detail reads to Dart via FRB.
//! - Collapse every failure into one user-facing notice.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Store I/O runs in non-`sync` functions, i.e. on the FRB worker pool.
//! - Failures carry `GENERIC_FAILURE_MESSAGE` plus a diagnostic `detail`.

use log::warn;
use shelter_core::db::{
    close_store as close_store_inner, current_store, get_or_open_store, StoreHandle,
};
use shelter_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, seed_database,
    Animal, AnimalService, PreferenceStore, SeedError, SeedOutcome, ShelterConfig,
    SqliteAnimalRepository,
};
use std::sync::Arc;

/// Notice shown by the UI for any store failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again...";

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Outcome envelope for store bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreInitResponse {
    pub ok: bool,
    /// Whether this call wrote the sample data.
    pub seeded_now: bool,
    /// User-facing message.
    pub message: String,
    /// Diagnostic detail; empty on success.
    pub detail: String,
}

/// Row shown by the animal list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalListItem {
    pub animal_id: i64,
    /// `dog` or `cat`.
    pub species: String,
    pub name: String,
    pub breed: String,
    pub content_description: String,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalListResponse {
    pub ok: bool,
    /// Newest first.
    pub items: Vec<AnimalListItem>,
    pub message: String,
    pub detail: String,
}

/// Flattened detail view; species-only fields are `None` for the other species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalDetailView {
    pub animal_id: i64,
    pub species: String,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub color: String,
    pub hair_type: String,
    pub cuteness: u8,
    pub adoption_content: String,
    pub content_description: String,
    pub created_on_epoch_ms: i64,
    pub happiness: Option<u8>,
    pub size: Option<String>,
    pub coat_length: Option<String>,
    pub laziness: Option<u8>,
    pub curiosity: Option<u8>,
}

/// Detail response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimalDetailResponse {
    pub ok: bool,
    pub animal: Option<AnimalDetailView>,
    pub message: String,
    pub detail: String,
}

/// Opens the process-wide store and seeds it on first launch.
///
/// `data_dir` blank means `SHELTER_DATA_DIR` or the temp directory.
///
/// # FFI contract
/// - Async call on the FRB worker pool.
/// - Creates `data_dir` when missing.
/// - Idempotent for the same `data_dir`.
/// - Never panics.
pub fn init_store(data_dir: String) -> StoreInitResponse {
    let config = resolve_config(&data_dir);
    match open_and_seed(&config) {
        Ok(SeedOutcome::Seeded { .. }) => StoreInitResponse {
            ok: true,
            seeded_now: true,
            message: "Store ready.".to_string(),
            detail: String::new(),
        },
        Ok(SeedOutcome::AlreadySeeded) => StoreInitResponse {
            ok: true,
            seeded_now: false,
            message: "Store ready.".to_string(),
            detail: String::new(),
        },
        Err(detail) => {
            warn!("event=ffi_init_store module=ffi status=error error={detail}");
            StoreInitResponse {
                ok: false,
                seeded_now: false,
                message: GENERIC_FAILURE_MESSAGE.to_string(),
                detail,
            }
        }
    }
}

/// Lists all animals, newest first.
///
/// # FFI contract
/// - Async call on the FRB worker pool.
/// - Fails with the generic notice when `init_store` has not succeeded.
/// - Never panics.
pub fn list_animals() -> AnimalListResponse {
    match with_service(|service| service.list_animals()) {
        Ok(animals) => {
            let items = animals.iter().map(to_list_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No animals.".to_string()
            } else {
                format!("Found {} animal(s).", items.len())
            };
            AnimalListResponse {
                ok: true,
                items,
                message,
                detail: String::new(),
            }
        }
        Err(detail) => {
            warn!("event=ffi_list_animals module=ffi status=error error={detail}");
            AnimalListResponse {
                ok: false,
                items: Vec::new(),
                message: GENERIC_FAILURE_MESSAGE.to_string(),
                detail,
            }
        }
    }
}

/// Loads the animal at `position` of the list returned by `list_animals`.
///
/// # FFI contract
/// - Async call on the FRB worker pool.
/// - Out-of-range positions are failures with the generic notice.
/// - Never panics.
pub fn animal_detail(position: u32) -> AnimalDetailResponse {
    let lookup = with_service(|service| service.animal_at(position as usize));
    match lookup {
        Ok(Some(animal)) => AnimalDetailResponse {
            ok: true,
            animal: Some(to_detail_view(&animal)),
            message: String::new(),
            detail: String::new(),
        },
        Ok(None) => failed_detail(format!("no animal at position {position}")),
        Err(detail) => failed_detail(detail),
    }
}

/// Releases the process-wide store handle.
///
/// # FFI contract
/// - Sync call.
/// - Returns `true` when a store was open.
#[flutter_rust_bridge::frb(sync)]
pub fn close_store() -> bool {
    close_store_inner()
}

fn failed_detail(detail: String) -> AnimalDetailResponse {
    warn!("event=ffi_animal_detail module=ffi status=error error={detail}");
    AnimalDetailResponse {
        ok: false,
        animal: None,
        message: GENERIC_FAILURE_MESSAGE.to_string(),
        detail,
    }
}

fn resolve_config(data_dir: &str) -> ShelterConfig {
    let trimmed = data_dir.trim();
    if trimmed.is_empty() {
        ShelterConfig::from_env()
    } else {
        ShelterConfig::new(trimmed)
    }
}

fn open_and_seed(config: &ShelterConfig) -> Result<SeedOutcome, String> {
    std::fs::create_dir_all(config.data_dir()).map_err(|err| {
        format!(
            "failed to create data dir {}: {err}",
            config.data_dir().display()
        )
    })?;
    let store = get_or_open_store(config.db_path()).map_err(|err| err.to_string())?;
    store
        .with_conn(|conn| -> Result<SeedOutcome, SeedError> {
            let mut prefs = PreferenceStore::open(config.prefs_path())?;
            seed_database(conn, &mut prefs, &mut rand::thread_rng())
        })
        .map_err(|err| err.to_string())
}

fn resolve_store() -> Result<Arc<StoreHandle>, String> {
    current_store().ok_or_else(|| "store not initialized; call init_store first".to_string())
}

fn with_service<T>(
    f: impl FnOnce(&AnimalService<SqliteAnimalRepository<'_>>) -> shelter_core::RepoResult<T>,
) -> Result<T, String> {
    let store = resolve_store()?;
    store.with_conn(|conn| {
        let repo = SqliteAnimalRepository::try_new(conn).map_err(|err| err.to_string())?;
        let service = AnimalService::new(repo);
        f(&service).map_err(|err| err.to_string())
    })
}

fn to_list_item(animal: &Animal) -> AnimalListItem {
    let base = animal.base();
    AnimalListItem {
        animal_id: base.animal_id,
        species: animal.species().label().to_string(),
        name: base.name.clone(),
        breed: base.breed.clone(),
        content_description: base.content_description.clone(),
    }
}

fn to_detail_view(animal: &Animal) -> AnimalDetailView {
    let base = animal.base();
    let mut view = AnimalDetailView {
        animal_id: base.animal_id,
        species: animal.species().label().to_string(),
        name: base.name.clone(),
        breed: base.breed.clone(),
        age: base.age.clone(),
        color: base.color.clone(),
        hair_type: base.hair_type.label().to_string(),
        cuteness: base.cuteness,
        adoption_content: base.adoption_content.clone(),
        content_description: base.content_description.clone(),
        created_on_epoch_ms: base.created_on,
        happiness: None,
        size: None,
        coat_length: None,
        laziness: None,
        curiosity: None,
    };
    match animal {
        Animal::Dog(dog) => {
            view.happiness = Some(dog.happiness);
            view.size = Some(dog.size.clone());
            view.coat_length = Some(dog.coat_length.clone());
        }
        Animal::Cat(cat) => {
            view.laziness = Some(cat.laziness);
            view.curiosity = Some(cat.curiosity);
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::{
        animal_detail, core_version, init_logging, init_store, list_animals,
        GENERIC_FAILURE_MESSAGE,
    };
    use std::sync::OnceLock;
    use tempfile::TempDir;

    static SHARED_DATA_DIR: OnceLock<TempDir> = OnceLock::new();

    fn shared_data_dir() -> String {
        SHARED_DATA_DIR
            .get_or_init(|| tempfile::tempdir().expect("create shared data dir"))
            .path()
            .to_str()
            .expect("temp dir should be valid UTF-8")
            .to_string()
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn init_store_is_idempotent_and_list_is_newest_first() {
        let first = init_store(shared_data_dir());
        assert!(first.ok, "{}", first.detail);
        let second = init_store(shared_data_dir());
        assert!(second.ok, "{}", second.detail);
        assert!(!second.seeded_now);

        let response = list_animals();
        assert!(response.ok, "{}", response.detail);
        assert_eq!(response.items.len(), 50);
        assert!(response
            .items
            .iter()
            .all(|item| item.species == "dog" || item.species == "cat"));
    }

    #[test]
    fn detail_matches_list_position_and_carries_species_fields() {
        assert!(init_store(shared_data_dir()).ok);
        let list = list_animals();
        assert!(list.ok, "{}", list.detail);

        let response = animal_detail(0);
        assert!(response.ok, "{}", response.detail);
        let view = response.animal.expect("detail should carry an animal");
        assert_eq!(view.animal_id, list.items[0].animal_id);
        assert_eq!(view.name, list.items[0].name);
        match view.species.as_str() {
            "dog" => {
                assert!(view.happiness.is_some() && view.size.is_some());
                assert!(view.laziness.is_none());
            }
            "cat" => {
                assert!(view.laziness.is_some() && view.curiosity.is_some());
                assert!(view.happiness.is_none());
            }
            other => panic!("unexpected species {other}"),
        }
    }

    #[test]
    fn out_of_range_detail_reports_generic_failure() {
        assert!(init_store(shared_data_dir()).ok);

        let response = animal_detail(10_000);
        assert!(!response.ok);
        assert!(response.animal.is_none());
        assert_eq!(response.message, GENERIC_FAILURE_MESSAGE);
        assert!(response.detail.contains("10000"));
    }

    #[test]
    fn switching_store_directory_reports_generic_failure() {
        assert!(init_store(shared_data_dir()).ok);
        let other = tempfile::tempdir().unwrap();

        let response = init_store(other.path().to_str().unwrap().to_string());
        assert!(!response.ok);
        assert_eq!(response.message, GENERIC_FAILURE_MESSAGE);
        assert!(response.detail.contains("refusing to switch"));
    }
}
