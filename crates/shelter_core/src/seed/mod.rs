//! One-time store seeding.
//!
//! # Responsibility
//! - Generate the synthetic sample batch.
//! - Persist it in a single transaction.
//! - Make sure seeding happens once across launches.
//!
//! # Invariants
//! - The persisted `database_seeded` flag is only set after the batch commits.
//! - A store that already holds animals is never seeded again, even when the
//!   flag was lost.
//! - A set flag over an empty store (database file replaced) is treated as
//!   unseeded.
//! - Concurrent callers in one process are serialized by `SEED_LOCK`.

mod generator;
mod lexicon;

pub use generator::{adoption_content, generate_seed, SeedBatch};

use crate::model::animal::now_epoch_ms;
use crate::prefs::{PreferenceStore, PrefsError};
use crate::repo::animal_repo::{
    count_animals, insert_animal_row, insert_cat_row, insert_dog_row, RepoError,
};
use log::{error, info, warn};
use rand::Rng;
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Number of animals written by the seed routine.
pub const SEED_ANIMAL_COUNT: u32 = 50;

static SEED_LOCK: Mutex<()> = Mutex::new(());

pub type SeedResult<T> = Result<T, SeedError>;

#[derive(Debug)]
pub enum SeedError {
    Repo(RepoError),
    Prefs(PrefsError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "seeding failed: {err}"),
            Self::Prefs(err) => write!(f, "seeding failed: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Prefs(err) => Some(err),
        }
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for SeedError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

impl From<PrefsError> for SeedError {
    fn from(value: PrefsError) -> Self {
        Self::Prefs(value)
    }
}

/// Result of one `seed_database` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The batch was written during this call.
    Seeded {
        animals: usize,
        dogs: usize,
        cats: usize,
    },
    /// Nothing was written; the store was seeded on an earlier launch.
    AlreadySeeded,
}

/// Seeds the store once, gated by the persisted preference flag.
///
/// # Side effects
/// - Writes `SEED_ANIMAL_COUNT` animals when the store is empty.
/// - Sets `database_seeded` after the write commits, or when the store
///   already contains animals.
pub fn seed_database<R: Rng + ?Sized>(
    conn: &mut Connection,
    prefs: &mut PreferenceStore,
    rng: &mut R,
) -> SeedResult<SeedOutcome> {
    let _guard = SEED_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    let existing = count_animals(conn)?;
    if prefs.is_seeded() && existing > 0 {
        info!("event=seed module=seed status=skipped reason=flag_set");
        return Ok(SeedOutcome::AlreadySeeded);
    }
    if prefs.is_seeded() {
        warn!("event=seed module=seed status=reseed reason=flag_set_store_empty");
    } else if existing > 0 {
        prefs.set_seeded(true)?;
        info!(
            "event=seed module=seed status=skipped reason=store_not_empty animals={}",
            existing
        );
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let started_at = Instant::now();
    info!("event=seed module=seed status=start count={SEED_ANIMAL_COUNT}");
    let batch = generate_seed(rng, SEED_ANIMAL_COUNT, now_epoch_ms());

    if let Err(err) = insert_seed_batch(conn, &batch) {
        error!(
            "event=seed module=seed status=error duration_ms={} error_code=seed_insert_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err);
    }
    prefs.set_seeded(true)?;

    info!(
        "event=seed module=seed status=ok animals={} dogs={} cats={} duration_ms={}",
        batch.animals.len(),
        batch.dogs.len(),
        batch.cats.len(),
        started_at.elapsed().as_millis()
    );
    Ok(SeedOutcome::Seeded {
        animals: batch.animals.len(),
        dogs: batch.dogs.len(),
        cats: batch.cats.len(),
    })
}

/// Writes animals, then dogs, then cats in one immediate transaction.
pub fn insert_seed_batch(conn: &mut Connection, batch: &SeedBatch) -> SeedResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    for animal in &batch.animals {
        insert_animal_row(&tx, animal)?;
    }
    for dog in &batch.dogs {
        insert_dog_row(&tx, dog)?;
    }
    for cat in &batch.cats {
        insert_cat_row(&tx, cat)?;
    }
    tx.commit()?;
    Ok(())
}
