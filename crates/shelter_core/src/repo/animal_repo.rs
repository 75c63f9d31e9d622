//! Animal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/query/delete APIs over `animals`, `dogs` and `cats`.
//! - Map species joins into the `Animal` sum type.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate rows before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `list_animals` is ordered by `created_on DESC, animal_id DESC`.
//! - An animal owns at most one child row across both species tables.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::animal::{
    validate_score, Animal, AnimalId, AnimalRecord, CatAndAnimal, CatRecord, DogAndAnimal,
    DogRecord, HairType, ModelValidationError, Species,
};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ANIMAL_COLUMNS: &str = "a.animal_id AS animal_id,
    a.name AS name,
    a.cuteness AS cuteness,
    a.breed AS breed,
    a.hair_type AS hair_type,
    a.adoption_content AS adoption_content,
    a.content_description AS content_description,
    a.age AS age,
    a.color AS color,
    a.created_on AS created_on";

const DOG_COLUMNS: &str = "d.dog_id AS dog_id,
    d.dog_animal_id AS dog_animal_id,
    d.happiness AS happiness,
    d.coat_length AS coat_length,
    d.size AS size";

const CAT_COLUMNS: &str = "c.cat_id AS cat_id,
    c.cat_animal_id AS cat_animal_id,
    c.laziness AS laziness,
    c.curiosity AS curiosity";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for animal persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    /// No row with `id` exists in `table`.
    NotFound { table: &'static str, id: i64 },
    /// The animal already owns a child row.
    SpeciesConflict {
        animal_id: AnimalId,
        existing: Species,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{table} row not found: {id}"),
            Self::SpeciesConflict {
                animal_id,
                existing,
            } => write!(
                f,
                "animal {animal_id} already has a {} record",
                existing.label()
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "animal repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted animal data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::SpeciesConflict { .. } => None,
            Self::UninitializedConnection { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for shelter animal data.
pub trait AnimalRepository {
    /// Lists base rows only, in `animal_id` order.
    fn get_all_animals(&self) -> RepoResult<Vec<AnimalRecord>>;
    /// Lists every dog joined with its owning animal.
    fn get_all_dogs(&self) -> RepoResult<Vec<DogAndAnimal>>;
    /// Lists every cat joined with its owning animal.
    fn get_all_cats(&self) -> RepoResult<Vec<CatAndAnimal>>;
    fn get_dog_by_animal_id(&self, animal_id: AnimalId) -> RepoResult<Option<DogAndAnimal>>;
    fn get_cat_by_animal_id(&self, animal_id: AnimalId) -> RepoResult<Option<CatAndAnimal>>;
    fn insert_animal(&self, animal: &AnimalRecord) -> RepoResult<()>;
    /// Inserts all rows in one transaction; nothing is written on failure.
    fn insert_all_animals(&self, animals: &[AnimalRecord]) -> RepoResult<()>;
    fn insert_dog(&self, dog: &DogRecord) -> RepoResult<()>;
    fn insert_all_dogs(&self, dogs: &[DogRecord]) -> RepoResult<()>;
    fn insert_cat(&self, cat: &CatRecord) -> RepoResult<()>;
    fn insert_all_cats(&self, cats: &[CatRecord]) -> RepoResult<()>;
    /// Deletes one animal and, by cascade, its child row.
    fn delete_animal(&self, animal_id: AnimalId) -> RepoResult<()>;
    fn delete_dog(&self, dog_id: i64) -> RepoResult<()>;
    fn delete_cat(&self, cat_id: i64) -> RepoResult<()>;

    /// Returns dogs and cats together, newest first.
    fn list_animals(&self) -> RepoResult<Vec<Animal>> {
        let dogs = self.get_all_dogs()?;
        let cats = self.get_all_cats()?;
        let mut animals = Vec::with_capacity(dogs.len() + cats.len());
        animals.extend(cats.into_iter().map(|cat| Animal::Cat(cat.into())));
        animals.extend(dogs.into_iter().map(|dog| Animal::Dog(dog.into())));
        sort_newest_first(&mut animals);
        Ok(animals)
    }
}

/// Sorts by `created_on` descending; ties fall back to `animal_id` descending.
pub fn sort_newest_first(animals: &mut [Animal]) {
    animals.sort_by(|left, right| match right.created_on().cmp(&left.created_on()) {
        Ordering::Equal => right.animal_id().cmp(&left.animal_id()),
        other => other,
    });
}

/// SQLite-backed animal repository.
pub struct SqliteAnimalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnimalRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AnimalRepository for SqliteAnimalRepository<'_> {
    fn get_all_animals(&self) -> RepoResult<Vec<AnimalRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals a ORDER BY a.animal_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut animals = Vec::new();
        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }
        Ok(animals)
    }

    fn get_all_dogs(&self) -> RepoResult<Vec<DogAndAnimal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ANIMAL_COLUMNS}, {DOG_COLUMNS}
             FROM animals a
             INNER JOIN dogs d ON d.dog_animal_id = a.animal_id
             ORDER BY a.animal_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut dogs = Vec::new();
        while let Some(row) = rows.next()? {
            dogs.push(parse_dog_join(row)?);
        }
        Ok(dogs)
    }

    fn get_all_cats(&self) -> RepoResult<Vec<CatAndAnimal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ANIMAL_COLUMNS}, {CAT_COLUMNS}
             FROM animals a
             INNER JOIN cats c ON c.cat_animal_id = a.animal_id
             ORDER BY a.animal_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut cats = Vec::new();
        while let Some(row) = rows.next()? {
            cats.push(parse_cat_join(row)?);
        }
        Ok(cats)
    }

    fn get_dog_by_animal_id(&self, animal_id: AnimalId) -> RepoResult<Option<DogAndAnimal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ANIMAL_COLUMNS}, {DOG_COLUMNS}
             FROM animals a
             INNER JOIN dogs d ON d.dog_animal_id = a.animal_id
             WHERE a.animal_id = ?1;"
        ))?;
        let mut rows = stmt.query([animal_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_dog_join(row)?)),
            None => Ok(None),
        }
    }

    fn get_cat_by_animal_id(&self, animal_id: AnimalId) -> RepoResult<Option<CatAndAnimal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ANIMAL_COLUMNS}, {CAT_COLUMNS}
             FROM animals a
             INNER JOIN cats c ON c.cat_animal_id = a.animal_id
             WHERE a.animal_id = ?1;"
        ))?;
        let mut rows = stmt.query([animal_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_cat_join(row)?)),
            None => Ok(None),
        }
    }

    fn insert_animal(&self, animal: &AnimalRecord) -> RepoResult<()> {
        insert_animal_row(self.conn, animal)
    }

    fn insert_all_animals(&self, animals: &[AnimalRecord]) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for animal in animals {
            insert_animal_row(&tx, animal)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_dog(&self, dog: &DogRecord) -> RepoResult<()> {
        insert_dog_row(self.conn, dog)
    }

    fn insert_all_dogs(&self, dogs: &[DogRecord]) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for dog in dogs {
            insert_dog_row(&tx, dog)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_cat(&self, cat: &CatRecord) -> RepoResult<()> {
        insert_cat_row(self.conn, cat)
    }

    fn insert_all_cats(&self, cats: &[CatRecord]) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for cat in cats {
            insert_cat_row(&tx, cat)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_animal(&self, animal_id: AnimalId) -> RepoResult<()> {
        delete_by_id(self.conn, "animals", "animal_id", animal_id)
    }

    fn delete_dog(&self, dog_id: i64) -> RepoResult<()> {
        delete_by_id(self.conn, "dogs", "dog_id", dog_id)
    }

    fn delete_cat(&self, cat_id: i64) -> RepoResult<()> {
        delete_by_id(self.conn, "cats", "cat_id", cat_id)
    }
}

/// Counts rows in `animals`.
pub fn count_animals(conn: &Connection) -> RepoResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM animals;", [], |row| row.get(0))?;
    Ok(count)
}

pub(crate) fn insert_animal_row(conn: &Connection, animal: &AnimalRecord) -> RepoResult<()> {
    animal.validate()?;
    conn.execute(
        "INSERT INTO animals (
            animal_id,
            name,
            cuteness,
            breed,
            hair_type,
            adoption_content,
            content_description,
            age,
            color,
            created_on
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            animal.animal_id,
            animal.name.as_str(),
            animal.cuteness,
            animal.breed.as_str(),
            animal.hair_type.ordinal(),
            animal.adoption_content.as_str(),
            animal.content_description.as_str(),
            animal.age.as_str(),
            animal.color.as_str(),
            animal.created_on,
        ],
    )?;
    Ok(())
}

pub(crate) fn insert_dog_row(conn: &Connection, dog: &DogRecord) -> RepoResult<()> {
    dog.validate()?;
    ensure_child_slot_free(conn, dog.dog_animal_id)?;
    conn.execute(
        "INSERT INTO dogs (dog_id, dog_animal_id, happiness, coat_length, size)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            dog.dog_id,
            dog.dog_animal_id,
            dog.happiness,
            dog.coat_length.as_str(),
            dog.size.as_str(),
        ],
    )?;
    Ok(())
}

pub(crate) fn insert_cat_row(conn: &Connection, cat: &CatRecord) -> RepoResult<()> {
    cat.validate()?;
    ensure_child_slot_free(conn, cat.cat_animal_id)?;
    conn.execute(
        "INSERT INTO cats (cat_id, cat_animal_id, laziness, curiosity)
         VALUES (?1, ?2, ?3, ?4);",
        params![cat.cat_id, cat.cat_animal_id, cat.laziness, cat.curiosity],
    )?;
    Ok(())
}

fn ensure_child_slot_free(conn: &Connection, animal_id: AnimalId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM animals WHERE animal_id = ?1);",
        [animal_id],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::NotFound {
            table: "animals",
            id: animal_id,
        });
    }

    let existing = conn
        .query_row(
            "SELECT 'dog' FROM dogs WHERE dog_animal_id = ?1
             UNION ALL
             SELECT 'cat' FROM cats WHERE cat_animal_id = ?1
             LIMIT 1;",
            [animal_id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match existing.as_deref() {
        None => Ok(()),
        Some("dog") => Err(RepoError::SpeciesConflict {
            animal_id,
            existing: Species::Dog,
        }),
        Some(_) => Err(RepoError::SpeciesConflict {
            animal_id,
            existing: Species::Cat,
        }),
    }
}

fn delete_by_id(
    conn: &Connection,
    table: &'static str,
    id_column: &'static str,
    id: i64,
) -> RepoResult<()> {
    let changed = conn.execute(&format!("DELETE FROM {table} WHERE {id_column} = ?1;"), [id])?;
    if changed == 0 {
        return Err(RepoError::NotFound { table, id });
    }
    Ok(())
}

fn parse_animal_row(row: &Row<'_>) -> RepoResult<AnimalRecord> {
    let hair_ordinal: i64 = row.get("hair_type")?;
    let hair_type = HairType::from_ordinal(hair_ordinal).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid hair type `{hair_ordinal}` in animals.hair_type"
        ))
    })?;

    let animal = AnimalRecord {
        animal_id: row.get("animal_id")?,
        name: row.get("name")?,
        breed: row.get("breed")?,
        hair_type,
        age: row.get("age")?,
        color: row.get("color")?,
        cuteness: parse_score(row, "animals", "cuteness")?,
        adoption_content: row.get("adoption_content")?,
        content_description: row.get("content_description")?,
        created_on: row.get("created_on")?,
    };
    animal
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("animal {}: {err}", animal.animal_id)))?;
    Ok(animal)
}

fn parse_dog_join(row: &Row<'_>) -> RepoResult<DogAndAnimal> {
    let animal = parse_animal_row(row)?;
    let dog = DogRecord {
        dog_id: row.get("dog_id")?,
        dog_animal_id: row.get("dog_animal_id")?,
        happiness: parse_score(row, "dogs", "happiness")?,
        coat_length: row.get("coat_length")?,
        size: row.get("size")?,
    };
    Ok(DogAndAnimal { animal, dog })
}

fn parse_cat_join(row: &Row<'_>) -> RepoResult<CatAndAnimal> {
    let animal = parse_animal_row(row)?;
    let cat = CatRecord {
        cat_id: row.get("cat_id")?,
        cat_animal_id: row.get("cat_animal_id")?,
        laziness: parse_score(row, "cats", "laziness")?,
        curiosity: parse_score(row, "cats", "curiosity")?,
    };
    Ok(CatAndAnimal { animal, cat })
}

fn parse_score(row: &Row<'_>, table: &'static str, column: &'static str) -> RepoResult<u8> {
    let value: i64 = row.get(column)?;
    validate_score(column, value)
        .map_err(|err| RepoError::InvalidData(format!("{err} in {table}.{column}")))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
