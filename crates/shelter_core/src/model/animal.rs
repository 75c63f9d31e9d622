//! Shelter animal domain model.
//!
//! # Responsibility
//! - Define the persisted row shapes for `animals`, `dogs` and `cats`.
//! - Define the `Animal` sum type handed to list/detail consumers.
//!
//! # Invariants
//! - Every numeric score is within `[SCORE_MIN, SCORE_MAX]`.
//! - A `Dog`/`Cat` value always carries its full owning `AnimalRecord`.
//! - `created_on` is Unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Primary key of the `animals` table.
pub type AnimalId = i64;

/// Lowest score any randomized attribute may take.
pub const SCORE_MIN: u8 = 50;
/// Highest score any randomized attribute may take.
pub const SCORE_MAX: u8 = 100;

/// Coat hair type. Persisted as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HairType {
    Short,
    Long,
}

impl HairType {
    /// All variants in ordinal order.
    pub const ALL: [HairType; 2] = [HairType::Short, HairType::Long];

    pub fn ordinal(self) -> i64 {
        match self {
            Self::Short => 0,
            Self::Long => 1,
        }
    }

    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Short),
            1 => Some(Self::Long),
            _ => None,
        }
    }

    /// Display label used by detail views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Long => "Long",
        }
    }
}

/// Species discriminator for `Animal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }
}

/// Validation errors for animal rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A score field fell outside `[SCORE_MIN, SCORE_MAX]`.
    ScoreOutOfRange { field: &'static str, value: i64 },
    /// A required text field is blank.
    EmptyField(&'static str),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScoreOutOfRange { field, value } => write!(
                f,
                "{field} ({value}) must be within [{SCORE_MIN}, {SCORE_MAX}]"
            ),
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
        }
    }
}

impl Error for ModelValidationError {}

/// Checks that `value` is a valid score for `field`.
pub fn validate_score(field: &'static str, value: i64) -> Result<u8, ModelValidationError> {
    if value < i64::from(SCORE_MIN) || value > i64::from(SCORE_MAX) {
        return Err(ModelValidationError::ScoreOutOfRange { field, value });
    }
    // Range check above guarantees the cast is lossless.
    Ok(value as u8)
}

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

/// Base row of the `animals` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub animal_id: AnimalId,
    pub name: String,
    pub breed: String,
    pub hair_type: HairType,
    /// Free text, e.g. `"kitten"` or `"young"`.
    pub age: String,
    pub color: String,
    pub cuteness: u8,
    /// Human-readable adoption blurb.
    pub adoption_content: String,
    /// Accessibility description of the animal's avatar.
    pub content_description: String,
    /// Unix epoch milliseconds.
    pub created_on: i64,
}

impl AnimalRecord {
    /// Validates text and score fields before persistence.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptyField("name"));
        }
        if self.breed.trim().is_empty() {
            return Err(ModelValidationError::EmptyField("breed"));
        }
        validate_score("cuteness", i64::from(self.cuteness))?;
        Ok(())
    }
}

/// Row of the `dogs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRecord {
    pub dog_id: i64,
    pub dog_animal_id: AnimalId,
    pub happiness: u8,
    pub coat_length: String,
    pub size: String,
}

impl DogRecord {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_score("happiness", i64::from(self.happiness))?;
        Ok(())
    }
}

/// Row of the `cats` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatRecord {
    pub cat_id: i64,
    pub cat_animal_id: AnimalId,
    pub laziness: u8,
    pub curiosity: u8,
}

impl CatRecord {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        validate_score("laziness", i64::from(self.laziness))?;
        validate_score("curiosity", i64::from(self.curiosity))?;
        Ok(())
    }
}

/// Join of one `animals` row with its `dogs` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogAndAnimal {
    pub animal: AnimalRecord,
    pub dog: DogRecord,
}

/// Join of one `animals` row with its `cats` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatAndAnimal {
    pub animal: AnimalRecord,
    pub cat: CatRecord,
}

/// Dog projection: base attributes plus dog-specific ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub animal: AnimalRecord,
    pub happiness: u8,
    pub coat_length: String,
    pub size: String,
}

/// Cat projection: base attributes plus cat-specific ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub animal: AnimalRecord,
    pub laziness: u8,
    pub curiosity: u8,
}

impl From<DogAndAnimal> for Dog {
    fn from(value: DogAndAnimal) -> Self {
        Self {
            animal: value.animal,
            happiness: value.dog.happiness,
            coat_length: value.dog.coat_length,
            size: value.dog.size,
        }
    }
}

impl From<CatAndAnimal> for Cat {
    fn from(value: CatAndAnimal) -> Self {
        Self {
            animal: value.animal,
            laziness: value.cat.laziness,
            curiosity: value.cat.curiosity,
        }
    }
}

/// Shelter animal as consumed by list/detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "species", rename_all = "snake_case")]
pub enum Animal {
    Dog(Dog),
    Cat(Cat),
}

impl Animal {
    pub fn species(&self) -> Species {
        match self {
            Self::Dog(_) => Species::Dog,
            Self::Cat(_) => Species::Cat,
        }
    }

    /// Shared base attributes.
    pub fn base(&self) -> &AnimalRecord {
        match self {
            Self::Dog(dog) => &dog.animal,
            Self::Cat(cat) => &cat.animal,
        }
    }

    pub fn animal_id(&self) -> AnimalId {
        self.base().animal_id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn breed(&self) -> &str {
        &self.base().breed
    }

    pub fn created_on(&self) -> i64 {
        self.base().created_on
    }

    /// Fixed dog used by previews and fixtures, stamped with the current time.
    pub fn sample_dog() -> Self {
        Self::Dog(Dog {
            animal: AnimalRecord {
                animal_id: 0,
                name: "Mark".to_string(),
                breed: "Great Dane".to_string(),
                hair_type: HairType::Short,
                age: "young".to_string(),
                color: "Brown".to_string(),
                cuteness: 100,
                adoption_content: "Lorem Ipsum".to_string(),
                content_description: "Sample".to_string(),
                created_on: now_epoch_ms(),
            },
            happiness: 100,
            coat_length: "Medium".to_string(),
            size: "Large".to_string(),
        })
    }

    /// Fixed cat used by previews and fixtures, stamped with the current time.
    pub fn sample_cat() -> Self {
        Self::Cat(Cat {
            animal: AnimalRecord {
                animal_id: 0,
                name: "Rollins".to_string(),
                breed: "Fancy Cat".to_string(),
                hair_type: HairType::Short,
                age: "young".to_string(),
                color: "Brown".to_string(),
                cuteness: 100,
                adoption_content: "Lorem Ipsum".to_string(),
                content_description: "Sample".to_string(),
                created_on: now_epoch_ms(),
            },
            laziness: 100,
            curiosity: 50,
        })
    }
}

impl From<Dog> for Animal {
    fn from(value: Dog) -> Self {
        Self::Dog(value)
    }
}

impl From<Cat> for Animal {
    fn from(value: Cat) -> Self {
        Self::Cat(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{now_epoch_ms, validate_score, Animal, HairType, ModelValidationError, Species};

    #[test]
    fn hair_type_ordinal_roundtrips_and_rejects_unknown() {
        for hair_type in HairType::ALL {
            assert_eq!(HairType::from_ordinal(hair_type.ordinal()), Some(hair_type));
        }
        assert_eq!(HairType::from_ordinal(2), None);
        assert_eq!(HairType::from_ordinal(-1), None);
    }

    #[test]
    fn validate_score_accepts_bounds_and_rejects_outside() {
        assert_eq!(validate_score("cuteness", 50), Ok(50));
        assert_eq!(validate_score("cuteness", 100), Ok(100));
        assert_eq!(
            validate_score("happiness", 49),
            Err(ModelValidationError::ScoreOutOfRange {
                field: "happiness",
                value: 49
            })
        );
        assert!(validate_score("laziness", 101).is_err());
    }

    #[test]
    fn animal_serializes_with_species_tag() {
        let sample = Animal::sample_dog();
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["species"], "dog");
        assert_eq!(json["animal"]["hair_type"], "short");
        assert_eq!(json["happiness"], 100);

        let decoded: Animal = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn samples_have_expected_species() {
        assert_eq!(Animal::sample_dog().species(), Species::Dog);
        assert_eq!(Animal::sample_cat().species(), Species::Cat);
        assert_eq!(Animal::sample_cat().name(), "Rollins");
    }

    #[test]
    fn samples_are_stamped_with_current_time() {
        let before = now_epoch_ms();
        let dog = Animal::sample_dog();
        let cat = Animal::sample_cat();
        let after = now_epoch_ms();

        for sample in [dog, cat] {
            assert!(sample.created_on() >= before && sample.created_on() <= after);
        }
    }
}
