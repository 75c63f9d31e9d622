//! Runtime configuration for store and preference locations.
//!
//! # Invariants
//! - `SHELTER_DATA_DIR` is used only when non-blank after trimming.
//! - Store and preference files always live in the same directory.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SHELTER_DATA_DIR";
/// SQLite file name inside the data directory.
pub const DB_FILE_NAME: &str = "animals.db";
/// Preference file name inside the data directory.
pub const PREFS_FILE_NAME: &str = "shelter_prefs.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelterConfig {
    pub data_dir: PathBuf,
}

impl ShelterConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the data directory from `SHELTER_DATA_DIR`, falling back to
    /// the system temp directory.
    pub fn from_env() -> Self {
        Self::new(resolve_data_dir(std::env::var(DATA_DIR_ENV).ok().as_deref()))
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir.join(PREFS_FILE_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn resolve_data_dir(raw: Option<&str>) -> PathBuf {
    match raw.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
        _ => std::env::temp_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_data_dir, ShelterConfig, DB_FILE_NAME, PREFS_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn blank_override_falls_back_to_temp_dir() {
        assert_eq!(resolve_data_dir(None), std::env::temp_dir());
        assert_eq!(resolve_data_dir(Some("   ")), std::env::temp_dir());
    }

    #[test]
    fn override_is_trimmed() {
        assert_eq!(
            resolve_data_dir(Some("  /data/shelter \n")),
            PathBuf::from("/data/shelter")
        );
    }

    #[test]
    fn files_share_the_data_dir() {
        let config = ShelterConfig::new("/data/shelter");
        assert_eq!(config.db_path(), PathBuf::from("/data/shelter").join(DB_FILE_NAME));
        assert_eq!(
            config.prefs_path(),
            PathBuf::from("/data/shelter").join(PREFS_FILE_NAME)
        );
    }
}
