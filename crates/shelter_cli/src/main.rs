//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open (and on first run seed) the store without the mobile runtime.
//! - Print a short, deterministic-format summary for local sanity checks.
//!
//! Usage: `shelter_cli [data_dir]`. Without an argument the directory comes
//! from `SHELTER_DATA_DIR` or the system temp directory.

use shelter_core::db::open_db;
use shelter_core::{
    core_version, seed_database, AnimalService, PreferenceStore, SeedOutcome, ShelterConfig,
    SqliteAnimalRepository,
};
use std::error::Error;
use std::process::ExitCode;

const PREVIEW_ROWS: usize = 5;

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(dir) => ShelterConfig::new(dir),
        None => ShelterConfig::from_env(),
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shelter_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ShelterConfig) -> Result<(), Box<dyn Error>> {
    println!("shelter_core version={}", core_version());
    println!("shelter_core data_dir={}", config.data_dir().display());

    std::fs::create_dir_all(config.data_dir())?;
    let mut conn = open_db(config.db_path())?;
    let mut prefs = PreferenceStore::open(config.prefs_path())?;
    match seed_database(&mut conn, &mut prefs, &mut rand::thread_rng())? {
        SeedOutcome::Seeded {
            animals,
            dogs,
            cats,
        } => println!("seed status=seeded animals={animals} dogs={dogs} cats={cats}"),
        SeedOutcome::AlreadySeeded => println!("seed status=already_seeded"),
    }

    let service = AnimalService::new(SqliteAnimalRepository::try_new(&conn)?);
    let animals = service.list_animals()?;
    println!("animals count={}", animals.len());
    for animal in animals.iter().take(PREVIEW_ROWS) {
        println!(
            "  #{} {} {} ({}) cuteness={}",
            animal.animal_id(),
            animal.species().label(),
            animal.name(),
            animal.breed(),
            animal.base().cuteness
        );
    }
    Ok(())
}
