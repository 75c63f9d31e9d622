//! Animal list/detail use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository contracts.
//! - Service layer remains storage-agnostic.

use crate::model::animal::{Animal, AnimalId};
use crate::repo::animal_repo::{AnimalRepository, RepoResult};
use log::{error, info};
use std::time::Instant;

/// Use-case service wrapper for shelter animal reads.
pub struct AnimalService<R: AnimalRepository> {
    repo: R,
}

impl<R: AnimalRepository> AnimalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all animals, newest first.
    pub fn list_animals(&self) -> RepoResult<Vec<Animal>> {
        let started_at = Instant::now();
        match self.repo.list_animals() {
            Ok(animals) => {
                info!(
                    "event=animals_list module=service status=ok count={} duration_ms={}",
                    animals.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(animals)
            }
            Err(err) => {
                error!(
                    "event=animals_list module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Returns the animal shown at `position` in `list_animals` order.
    pub fn animal_at(&self, position: usize) -> RepoResult<Option<Animal>> {
        let mut animals = self.list_animals()?;
        if position >= animals.len() {
            return Ok(None);
        }
        Ok(Some(animals.swap_remove(position)))
    }

    /// Loads one animal by id from whichever species table owns it.
    pub fn animal_detail(&self, animal_id: AnimalId) -> RepoResult<Option<Animal>> {
        if let Some(dog) = self.repo.get_dog_by_animal_id(animal_id)? {
            return Ok(Some(Animal::Dog(dog.into())));
        }
        Ok(self
            .repo
            .get_cat_by_animal_id(animal_id)?
            .map(|cat| Animal::Cat(cat.into())))
    }
}
