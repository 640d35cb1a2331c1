//! Save/load persistence with default fallback
//!
//! Features:
//! - JSON records keyed by name
//! - LocalStorage on web, a JSON file per key on native
//! - Read or parse failures log a warning and hand back the default value

pub mod profile;

pub use profile::{LifetimeStats, PlayerProfile, PlayerStats, UserInventory};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Why a record could not be written or read
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// No storage backend (no LocalStorage, no data directory)
    NoStorage,
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "storage i/o failed: {}", e),
            PersistError::Json(e) => write!(f, "invalid JSON: {}", e),
            PersistError::NoStorage => write!(f, "no storage available"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Json(e) => Some(e),
            PersistError::NoStorage => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

/// Parse a stored record, falling back to the default on malformed input
pub fn parse_or_default<T: DeserializeOwned + Default>(json: &str, what: &str) -> T {
    match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Stored {} is malformed ({}), using defaults", what, e);
            T::default()
        }
    }
}

/// Load a record by key, or the default if it is missing or unreadable
pub fn load<T: DeserializeOwned + Default>(key: &str) -> T {
    match read_raw(key) {
        Ok(Some(json)) => parse_or_default(&json, key),
        Ok(None) => {
            log::info!("No stored {}, starting fresh", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", key, e);
            T::default()
        }
    }
}

/// Save a record by key
pub fn save<T: Serialize>(key: &str, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string(value)?;
    write_raw(key, &json)?;
    log::debug!("Saved {} ({} bytes)", key, json.len());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PersistError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(PersistError::NoStorage)
}

#[cfg(target_arch = "wasm32")]
fn read_raw(key: &str) -> Result<Option<String>, PersistError> {
    let storage = local_storage()?;
    Ok(storage.get_item(key).ok().flatten())
}

#[cfg(target_arch = "wasm32")]
fn write_raw(key: &str, json: &str) -> Result<(), PersistError> {
    let storage = local_storage()?;
    storage.set_item(key, json).map_err(|_| PersistError::NoStorage)
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{load_from_path, save_to_path, storage_path};

#[cfg(not(target_arch = "wasm32"))]
fn read_raw(key: &str) -> Result<Option<String>, PersistError> {
    let path = storage_path(key).ok_or(PersistError::NoStorage)?;
    native::read_file(&path)
}

#[cfg(not(target_arch = "wasm32"))]
fn write_raw(key: &str, json: &str) -> Result<(), PersistError> {
    let path = storage_path(key).ok_or(PersistError::NoStorage)?;
    native::write_file(&path, json)
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{PersistError, parse_or_default};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use std::path::{Path, PathBuf};

    /// File backing a storage key on this machine
    pub fn storage_path(key: &str) -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("lane-shark").join(format!("{}.json", key)))
    }

    pub(super) fn read_file(path: &Path) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(super) fn write_file(path: &Path, json: &str) -> Result<(), PersistError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Atomic replace via a temp file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load a record from an explicit file
    pub fn load_from_path<T: DeserializeOwned + Default>(path: &Path) -> T {
        match read_file(path) {
            Ok(Some(json)) => parse_or_default(&json, &path.display().to_string()),
            Ok(None) => T::default(),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                T::default()
            }
        }
    }

    /// Save a record to an explicit file
    pub fn save_to_path<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(value)?;
        write_file(path, &json)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("lane-shark-test-{}", std::process::id()))
            .join(format!("{}.json", name))
    }

    #[test]
    fn test_missing_file_loads_default() {
        let inv: UserInventory = load_from_path(&temp_path("does-not-exist"));
        assert_eq!(inv.money, 0);
        assert!(inv.items.is_empty());
    }

    #[test]
    fn test_malformed_file_loads_default() {
        let path = temp_path("malformed");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, "{ money: nope").unwrap();
        let inv: UserInventory = load_from_path(&path);
        assert_eq!(inv, UserInventory::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip");
        let mut inv = UserInventory::default();
        inv.money = 1234;
        inv.items.push(String::from("magma_ball"));
        save_to_path(&path, &inv).unwrap();
        let loaded: UserInventory = load_from_path(&path);
        assert_eq!(loaded, inv);
    }

    #[test]
    fn test_error_display() {
        let err = PersistError::from(serde_json::from_str::<UserInventory>("[").unwrap_err());
        assert!(err.to_string().starts_with("invalid JSON"));
        assert_eq!(PersistError::NoStorage.to_string(), "no storage available");
    }
}
