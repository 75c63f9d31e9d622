//! Persisted app preferences.
//!
//! # Responsibility
//! - Load and store the small preference document kept beside the store.
//!
//! # Invariants
//! - A missing file reads as default preferences.
//! - Writes replace the file atomically (synced temp file + rename).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub type PrefsResult<T> = Result<T, PrefsError>;

#[derive(Debug)]
pub enum PrefsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for PrefsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "preferences I/O failed at `{}`: {source}", path.display())
            }
            Self::Json { path, source } => write!(
                f,
                "preferences file `{}` is malformed: {source}",
                path.display()
            ),
        }
    }
}

impl Error for PrefsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Preference document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Set once the seed routine has committed its batch.
    pub database_seeded: bool,
}

/// File-backed preference store.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Preferences,
}

impl PreferenceStore {
    /// Loads preferences from `path`, defaulting when the file is absent.
    pub fn open(path: impl AsRef<Path>) -> PrefsResult<Self> {
        let path = path.as_ref().to_path_buf();
        let prefs = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| PrefsError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(source) => return Err(PrefsError::Io { path, source }),
        };
        Ok(Self { path, prefs })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn is_seeded(&self) -> bool {
        self.prefs.database_seeded
    }

    /// Updates the seeded flag and persists it.
    pub fn set_seeded(&mut self, seeded: bool) -> PrefsResult<()> {
        let mut next = self.prefs.clone();
        next.database_seeded = seeded;
        self.write(&next)?;
        self.prefs = next;
        Ok(())
    }

    fn write(&self, prefs: &Preferences) -> PrefsResult<()> {
        let io_err = |source| PrefsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(prefs).map_err(|source| PrefsError::Json {
            path: self.path.clone(),
            source,
        })?;
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp = File::create(&tmp_path).map_err(io_err)?;
        tmp.write_all(&bytes).map_err(io_err)?;
        tmp.sync_all().map_err(io_err)?;
        drop(tmp);
        std::fs::rename(&tmp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PreferenceStore, PrefsError};

    #[test]
    fn missing_file_defaults_to_unseeded() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("prefs.json")).unwrap();
        assert!(!store.is_seeded());
    }

    #[test]
    fn seeded_flag_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = PreferenceStore::open(&path).unwrap();
        store.set_seeded(true).unwrap();
        drop(store);

        let reopened = PreferenceStore::open(&path).unwrap();
        assert!(reopened.is_seeded());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn write_overwrites_truncated_temp_file_from_interrupted_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(path.with_extension("json.tmp"), b"").unwrap();

        let mut store = PreferenceStore::open(&path).unwrap();
        store.set_seeded(true).unwrap();

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written["database_seeded"], true);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn unknown_keys_are_ignored_and_missing_keys_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, br#"{"theme":"dark"}"#).unwrap();

        let store = PreferenceStore::open(&path).unwrap();
        assert!(!store.is_seeded());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, b"not json").unwrap();

        let err = PreferenceStore::open(&path).unwrap_err();
        assert!(matches!(err, PrefsError::Json { .. }));
    }
}
