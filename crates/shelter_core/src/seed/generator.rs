//! Synthetic shelter animal generator.
//!
//! # Invariants
//! - Ids run from 1 to `count`; a child row reuses its animal's id.
//! - Every numeric score is drawn uniformly from `[SCORE_MIN, SCORE_MAX]`.
//! - Each generated animal gets exactly one child row.

use super::lexicon::{
    CAT_AGE_ADULT, CAT_AGE_KITTEN, CAT_BREEDS, CAT_SIZE, COLORS, DOG_AGES, DOG_BREEDS,
    DOG_COAT_LENGTHS, DOG_SIZES, NEUTRAL_FIRST_NAMES,
};
use crate::model::animal::{
    AnimalId, AnimalRecord, CatRecord, DogRecord, HairType, SCORE_MAX, SCORE_MIN,
};
use rand::Rng;

/// Rows produced by one seeding pass, grouped per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedBatch {
    pub animals: Vec<AnimalRecord>,
    pub dogs: Vec<DogRecord>,
    pub cats: Vec<CatRecord>,
}

/// Generates `count` animals, each a dog or a cat by fair coin flip.
///
/// All rows share `created_on = now_ms`.
pub fn generate_seed<R: Rng + ?Sized>(rng: &mut R, count: u32, now_ms: i64) -> SeedBatch {
    let mut batch = SeedBatch::default();
    for id in 1..=i64::from(count) {
        if rng.gen_bool(0.5) {
            let (animal, dog) = generate_dog(rng, id, now_ms);
            batch.animals.push(animal);
            batch.dogs.push(dog);
        } else {
            let (animal, cat) = generate_cat(rng, id, now_ms);
            batch.animals.push(animal);
            batch.cats.push(cat);
        }
    }
    batch
}

/// Builds the canned adoption sentence shown on the detail screen.
pub fn adoption_content(name: &str, breed: &str, size: &str, age: &str) -> String {
    format!(
        "Hi, I'm {name} and I'm a {breed}. I am {age}, {size} {breed} and full of energy. Please adopt me!"
    )
}

fn generate_dog<R: Rng + ?Sized>(
    rng: &mut R,
    id: AnimalId,
    now_ms: i64,
) -> (AnimalRecord, DogRecord) {
    let name = pick(rng, NEUTRAL_FIRST_NAMES);
    let breed = pick(rng, DOG_BREEDS);
    let age = pick(rng, DOG_AGES);
    let size = pick(rng, DOG_SIZES);

    let animal = AnimalRecord {
        animal_id: id,
        name: name.to_string(),
        breed: breed.to_string(),
        hair_type: random_hair_type(rng),
        age: age.to_string(),
        color: pick(rng, COLORS).to_string(),
        cuteness: random_score(rng),
        adoption_content: adoption_content(name, breed, size, age),
        content_description: format!("Dog with name {name}"),
        created_on: now_ms,
    };
    let dog = DogRecord {
        dog_id: id,
        dog_animal_id: id,
        happiness: random_score(rng),
        coat_length: pick(rng, DOG_COAT_LENGTHS).to_string(),
        size: size.to_string(),
    };
    (animal, dog)
}

fn generate_cat<R: Rng + ?Sized>(
    rng: &mut R,
    id: AnimalId,
    now_ms: i64,
) -> (AnimalRecord, CatRecord) {
    let name = pick(rng, NEUTRAL_FIRST_NAMES);
    let breed = pick(rng, CAT_BREEDS);
    let age = if rng.gen_bool(0.5) {
        CAT_AGE_KITTEN
    } else {
        CAT_AGE_ADULT
    };

    let animal = AnimalRecord {
        animal_id: id,
        name: name.to_string(),
        breed: breed.to_string(),
        hair_type: random_hair_type(rng),
        age: age.to_string(),
        color: pick(rng, COLORS).to_string(),
        cuteness: random_score(rng),
        adoption_content: adoption_content(name, breed, CAT_SIZE, age),
        content_description: format!("Cat with name {name}"),
        created_on: now_ms,
    };
    let cat = CatRecord {
        cat_id: id,
        cat_animal_id: id,
        laziness: random_score(rng),
        curiosity: random_score(rng),
    };
    (animal, cat)
}

fn random_score<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(SCORE_MIN..=SCORE_MAX)
}

fn random_hair_type<R: Rng + ?Sized>(rng: &mut R) -> HairType {
    HairType::ALL[rng.gen_range(0..HairType::ALL.len())]
}

// Lexicons are non-empty constants.
fn pick<R: Rng + ?Sized>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words[rng.gen_range(0..words.len())]
}
