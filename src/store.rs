//! Whole-catalog persistence.
//!
//! Every action loads the full catalog and saves it back in one piece. The
//! JSON backend replaces the store file atomically (write to a sibling temp
//! file, then rename) so an interrupted save never leaves a torn file.
//!
//! A missing store is a first run and yields the seeded catalog. A store that
//! exists but cannot be read, parsed, or describes an inconsistent catalog is
//! reported as an error and left untouched on disk.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{Catalog, IntegrityError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog at {} is unreadable: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog at {} is inconsistent: {source}", path.display())]
    Inconsistent {
        path: PathBuf,
        #[source]
        source: IntegrityError,
    },

    #[error("cannot encode catalog: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Load/save pair for the whole catalog.
pub trait CatalogStore {
    fn load(&self) -> Result<Catalog, StoreError>;

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError>;
}

/// Catalog stored as a single pretty-printed JSON file.
pub struct JsonStore {
    path: PathBuf,
    stock_dir: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>, stock_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stock_dir: stock_dir.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "catalog".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CatalogStore for JsonStore {
    fn load(&self) -> Result<Catalog, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = ?self.path, "No catalog found, starting with stock catalog");
                return Ok(Catalog::seeded(&self.stock_dir));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let catalog: Catalog = serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!(path = ?self.path, error = %source, "Catalog file is corrupt");
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        catalog.verify().map_err(|source| {
            tracing::error!(path = ?self.path, error = %source, "Catalog file is inconsistent");
            StoreError::Inconsistent {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::debug!(path = ?self.path, users = catalog.users().len(), "Catalog loaded");
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let content = serde_json::to_vec_pretty(catalog).map_err(StoreError::Encode)?;
        let temp = self.temp_path();

        let write_temp = || -> io::Result<()> {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&content)?;
            file.sync_all()
        };
        if let Err(e) = write_temp() {
            let _ = fs::remove_file(&temp);
            return Err(self.io_error(e));
        }
        fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, bytes = content.len(), "Catalog saved");
        Ok(())
    }
}

/// Catalog held in memory. Used by tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    catalog: RefCell<Option<Catalog>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RefCell::new(Some(catalog)),
            saves: RefCell::new(0),
        }
    }

    /// Number of completed saves.
    pub fn saves(&self) -> usize {
        *self.saves.borrow()
    }

    pub fn snapshot(&self) -> Catalog {
        self.catalog.borrow().clone().unwrap_or_default()
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> Result<Catalog, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        *self.catalog.borrow_mut() = Some(catalog.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Album, Photo, Tag, User};
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_catalog() -> Catalog {
        let mut ann = User::new("ann");
        ann.add_album(Album::new("trip"));
        ann.add_album(Album::new("best"));
        let mut photo = Photo::with_timestamp("/pics/a.jpg", Utc.timestamp_opt(1_000, 0).unwrap());
        photo.set_caption("beach");
        photo.add_tag(Tag::new("place", "beach"));
        ann.add_photo("trip", photo);
        ann.add_photo("best", Photo::new("/pics/a.jpg"));
        ann.add_photo("trip", Photo::with_timestamp("/pics/b.png", Utc.timestamp_opt(2_000, 0).unwrap()));

        let mut catalog = Catalog::new();
        catalog.add_user(ann);
        catalog.add_user(User::new("bob"));
        catalog
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("catalog.json"), dir.path());
        let catalog = sample_catalog();

        store.save(&catalog).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, catalog);

        let ann = loaded.user("ann").unwrap();
        assert_eq!(ann.library().len(), 2);
        assert_eq!(ann.photo("/pics/a.jpg").unwrap().caption(), "beach");
    }

    #[test]
    fn test_missing_file_is_first_run() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested/catalog.json"), dir.path());
        let catalog = store.load().unwrap();
        assert!(catalog.contains("stock"));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error_and_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = JsonStore::new(&path, dir.path());
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert_eq!(fs::read(&path).unwrap(), b"{ not json");
    }

    fn load_text(text: &str) -> Result<Catalog, StoreError> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, text).unwrap();
        let result = JsonStore::new(&path, dir.path()).load();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
        result
    }

    fn integrity(result: Result<Catalog, StoreError>) -> IntegrityError {
        match result {
            Err(StoreError::Inconsistent { source, .. }) => source,
            other => panic!("expected an inconsistent catalog, got {other:?}"),
        }
    }

    #[test]
    fn test_album_path_missing_from_library() {
        let err = integrity(load_text(
            r#"{"users":[{"name":"ann","library":{},"albums":[{"name":"trip","photos":["/x.jpg"]}]}]}"#,
        ));
        assert_eq!(
            err,
            IntegrityError::MissingPhoto {
                user: "ann".to_string(),
                album: "trip".to_string(),
                path: "/x.jpg".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = integrity(load_text(r#"{"users":[{"name":"ann"},{"name":"ann"}]}"#));
        assert_eq!(err, IntegrityError::DuplicateUser("ann".to_string()));

        let err = integrity(load_text(
            r#"{"users":[{"name":"ann","albums":[{"name":"trip","photos":[]},{"name":"trip","photos":[]}]}]}"#,
        ));
        assert_eq!(
            err,
            IntegrityError::DuplicateAlbum {
                user: "ann".to_string(),
                album: "trip".to_string(),
            }
        );
    }

    #[test]
    fn test_stored_admin_rejected() {
        let err = integrity(load_text(r#"{"users":[{"name":"admin"}]}"#));
        assert_eq!(err, IntegrityError::ReservedUser("admin".to_string()));
    }

    #[test]
    fn test_repeated_album_path_rejected() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("catalog.json"), dir.path());
        store.save(&sample_catalog()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["users"][0]["albums"][0]["photos"]
            .as_array_mut()
            .unwrap()
            .push("/pics/a.jpg".into());
        let err = integrity(load_text(&value.to_string()));
        assert!(matches!(err, IntegrityError::DuplicatePath { ref path, .. } if path == "/pics/a.jpg"));
    }

    #[test]
    fn test_save_replaces_and_cleans_temp() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("catalog.json"), dir.path());

        store.save(&sample_catalog()).unwrap();
        store.save(&Catalog::new()).unwrap();

        assert_eq!(store.load().unwrap(), Catalog::new());
        assert!(!dir.path().join("catalog.json.tmp").exists());
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let store = MemoryStore::new(Catalog::new());
        assert_eq!(store.saves(), 0);
        store.save(&sample_catalog()).unwrap();
        assert_eq!(store.saves(), 1);
        assert!(store.load().unwrap().contains("ann"));
    }
}
