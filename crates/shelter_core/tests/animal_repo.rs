use rusqlite::Connection;
use shelter_core::db::open_db_in_memory;
use shelter_core::{
    Animal, AnimalRecord, AnimalRepository, AnimalService, CatRecord, DogRecord, HairType,
    ModelValidationError, RepoError, Species, SqliteAnimalRepository,
};

fn animal(animal_id: i64, name: &str, created_on: i64) -> AnimalRecord {
    AnimalRecord {
        animal_id,
        name: name.to_string(),
        breed: "Beagle".to_string(),
        hair_type: HairType::Long,
        age: "young".to_string(),
        color: "tan".to_string(),
        cuteness: 77,
        adoption_content: format!("Hi, I'm {name}."),
        content_description: format!("Animal with name {name}"),
        created_on,
    }
}

fn dog(animal_id: i64) -> DogRecord {
    DogRecord {
        dog_id: animal_id,
        dog_animal_id: animal_id,
        happiness: 91,
        coat_length: "short".to_string(),
        size: "medium".to_string(),
    }
}

fn cat(animal_id: i64) -> CatRecord {
    CatRecord {
        cat_id: animal_id,
        cat_animal_id: animal_id,
        laziness: 64,
        curiosity: 88,
    }
}

#[test]
fn dog_join_carries_all_base_and_species_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    let base = animal(1, "Rex", 1_000);
    repo.insert_animal(&base).unwrap();
    repo.insert_dog(&dog(1)).unwrap();

    let joined = repo.get_dog_by_animal_id(1).unwrap().unwrap();
    assert_eq!(joined.animal, base);
    assert_eq!(joined.dog, dog(1));

    let animals = repo.list_animals().unwrap();
    assert_eq!(animals.len(), 1);
    match &animals[0] {
        Animal::Dog(mapped) => {
            assert_eq!(mapped.animal, base);
            assert_eq!(mapped.happiness, 91);
            assert_eq!(mapped.coat_length, "short");
            assert_eq!(mapped.size, "medium");
        }
        other => panic!("expected dog, got {other:?}"),
    }
}

#[test]
fn cat_join_carries_all_base_and_species_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    let base = animal(2, "Misty", 2_000);
    repo.insert_animal(&base).unwrap();
    repo.insert_cat(&cat(2)).unwrap();

    let animals = repo.list_animals().unwrap();
    match &animals[0] {
        Animal::Cat(mapped) => {
            assert_eq!(mapped.animal, base);
            assert_eq!(mapped.laziness, 64);
            assert_eq!(mapped.curiosity, 88);
        }
        other => panic!("expected cat, got {other:?}"),
    }
    assert!(repo.get_dog_by_animal_id(2).unwrap().is_none());
}

#[test]
fn list_animals_mixes_species_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    repo.insert_all_animals(&[
        animal(1, "Oldest", 100),
        animal(2, "Newest", 400),
        animal(3, "Middle", 250),
        animal(4, "Tied", 250),
    ])
    .unwrap();
    repo.insert_all_dogs(&[dog(1), dog(3)]).unwrap();
    repo.insert_all_cats(&[cat(2), cat(4)]).unwrap();

    let animals = repo.list_animals().unwrap();
    let names: Vec<&str> = animals.iter().map(Animal::name).collect();
    assert_eq!(names, vec!["Newest", "Tied", "Middle", "Oldest"]);
    assert!(animals
        .windows(2)
        .all(|pair| pair[0].created_on() >= pair[1].created_on()));
}

#[test]
fn animals_without_child_rows_are_not_listed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    repo.insert_animal(&animal(1, "Orphan", 1)).unwrap();

    assert_eq!(repo.get_all_animals().unwrap().len(), 1);
    assert!(repo.list_animals().unwrap().is_empty());
}

#[test]
fn second_child_row_for_same_animal_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    repo.insert_animal(&animal(1, "Both", 1)).unwrap();
    repo.insert_dog(&dog(1)).unwrap();

    let err = repo.insert_cat(&cat(1)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::SpeciesConflict {
            animal_id: 1,
            existing: Species::Dog
        }
    ));

    let mut second_dog = dog(1);
    second_dog.dog_id = 99;
    let err = repo.insert_dog(&second_dog).unwrap_err();
    assert!(matches!(err, RepoError::SpeciesConflict { .. }));
}

#[test]
fn child_row_requires_owning_animal() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    let err = repo.insert_dog(&dog(42)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            table: "animals",
            id: 42
        }
    ));
}

#[test]
fn out_of_range_scores_are_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    let mut too_cute = animal(1, "Too Cute", 1);
    too_cute.cuteness = 101;
    let err = repo.insert_animal(&too_cute).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::ScoreOutOfRange {
            field: "cuteness",
            value: 101
        })
    ));

    repo.insert_animal(&animal(2, "Sleepy", 1)).unwrap();
    let mut lazy = cat(2);
    lazy.laziness = 12;
    assert!(matches!(
        repo.insert_cat(&lazy).unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(repo.get_all_cats().unwrap().is_empty());
}

#[test]
fn insert_all_animals_is_atomic() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    let duplicate = animal(1, "Again", 2);
    let err = repo
        .insert_all_animals(&[animal(1, "First", 1), duplicate])
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(repo.get_all_animals().unwrap().is_empty());
}

#[test]
fn delete_animal_cascades_to_child_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    repo.insert_animal(&animal(1, "Gone", 1)).unwrap();
    repo.insert_cat(&cat(1)).unwrap();

    repo.delete_animal(1).unwrap();

    assert!(repo.get_all_animals().unwrap().is_empty());
    assert!(repo.get_all_cats().unwrap().is_empty());
    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM cats;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn delete_child_keeps_animal_and_missing_rows_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();

    repo.insert_animal(&animal(1, "Stays", 1)).unwrap();
    repo.insert_dog(&dog(1)).unwrap();

    repo.delete_dog(1).unwrap();
    assert_eq!(repo.get_all_animals().unwrap().len(), 1);
    assert!(repo.get_all_dogs().unwrap().is_empty());

    assert!(matches!(
        repo.delete_dog(1).unwrap_err(),
        RepoError::NotFound {
            table: "dogs",
            id: 1
        }
    ));
    assert!(matches!(
        repo.delete_cat(7).unwrap_err(),
        RepoError::NotFound { table: "cats", .. }
    ));
    assert!(matches!(
        repo.delete_animal(7).unwrap_err(),
        RepoError::NotFound {
            table: "animals",
            ..
        }
    ));
}

#[test]
fn invalid_persisted_hair_type_is_reported() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO animals (
            animal_id, name, cuteness, breed, hair_type, adoption_content,
            content_description, age, color, created_on
         ) VALUES (1, 'Odd', 60, 'Manx', 7, 'x', 'y', 'kitten', 'gray', 0);
         INSERT INTO cats (cat_id, cat_animal_id, laziness, curiosity) VALUES (1, 1, 60, 60);",
    )
    .unwrap();

    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();
    let err = repo.list_animals().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("hair_type")));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteAnimalRepository::try_new(&conn)
        .err()
        .expect("unmigrated connection should be rejected");
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn service_resolves_detail_by_position_and_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAnimalRepository::try_new(&conn).unwrap();
    repo.insert_all_animals(&[animal(1, "Older", 10), animal(2, "Newer", 20)])
        .unwrap();
    repo.insert_dog(&dog(1)).unwrap();
    repo.insert_cat(&cat(2)).unwrap();

    let service = AnimalService::new(repo);

    let first = service.animal_at(0).unwrap().unwrap();
    assert_eq!(first.name(), "Newer");
    assert_eq!(first.species(), Species::Cat);
    assert!(service.animal_at(2).unwrap().is_none());

    let detail = service.animal_detail(1).unwrap().unwrap();
    assert_eq!(detail.species(), Species::Dog);
    assert_eq!(detail.name(), "Older");
    assert!(service.animal_detail(3).unwrap().is_none());
}
