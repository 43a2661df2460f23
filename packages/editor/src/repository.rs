//! # Layout Persistence
//!
//! Loads and saves a layout through a key/value [`Storage`], validating in
//! both directions.
//!
//! - A stored layout that needed repair is written back in repaired form.
//! - A layout that fails validation is never written.
//! - An unavailable store or an empty value reads as "nothing stored"; an
//!   unavailable store also refuses saves.
//! - A stored value that is not valid text reads as malformed.

use crate::errors::StorageError;
use pagebuilder_model::{parse_and_validate, validate_layout, PageLayout};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key the editor stores its layout under
pub const LAYOUT_STORAGE_KEY: &str = "page-builder-layout";

/// String key/value store
pub trait Storage {
    /// Read the value for `key`, `None` if nothing is stored
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store, mainly for tests and embedding
#[derive(Debug)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    available: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(HashMap::new()),
            available: Cell::new(true),
        }
    }

    /// Simulate a store that rejects every access
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl Storage for DirectoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let bytes = match std::fs::read(self.path_for(key)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| StorageError::Corrupt(key.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Result of reading the stored layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub layout: Option<PageLayout>,

    /// The stored layout was valid only after repair
    pub repaired: bool,

    /// Something was stored but no layout could be recovered from it
    pub malformed: bool,
}

impl LoadOutcome {
    fn malformed() -> Self {
        Self {
            layout: None,
            repaired: false,
            malformed: true,
        }
    }

    /// Nothing stored yet
    pub fn is_empty(&self) -> bool {
        self.layout.is_none() && !self.malformed
    }
}

/// Validating gateway between the editor and a [`Storage`]
#[derive(Debug)]
pub struct LayoutRepository<S> {
    storage: S,
    key: String,
}

impl<S: Storage> LayoutRepository<S> {
    /// Repository using the default layout key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, LAYOUT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read, validate and (if repaired) re-save the stored layout
    pub fn load_layout(&self) -> LoadOutcome {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) if raw.is_empty() => return LoadOutcome::default(),
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::default(),
            Err(StorageError::Corrupt(_)) => {
                tracing::warn!(key = %self.key, "stored layout is not valid text");
                return LoadOutcome::malformed();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read stored layout");
                return LoadOutcome::default();
            }
        };

        let result = parse_and_validate(&raw);
        let Some(layout) = result.layout else {
            tracing::warn!(key = %self.key, reason = ?result.reason, "stored layout is malformed");
            return LoadOutcome::malformed();
        };

        if result.repaired {
            tracing::info!(key = %self.key, "stored layout was repaired, saving corrected form");
            self.save_layout(&layout);
        } else {
            tracing::info!(key = %self.key, sections = layout.sections.len(), "loaded layout");
        }

        LoadOutcome {
            layout: Some(layout),
            repaired: result.repaired,
            malformed: false,
        }
    }

    /// Validate and store `layout`, returning whether it was written
    pub fn save_layout(&self, layout: &PageLayout) -> bool {
        let result = validate_layout(layout);
        let Some(valid) = result.layout else {
            tracing::warn!(key = %self.key, reason = ?result.reason, "refusing to save invalid layout");
            return false;
        };

        let json = match valid.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not serialize layout");
                return false;
            }
        };

        match self.storage.set_item(&self.key, &json) {
            Ok(()) => {
                tracing::info!(key = %self.key, bytes = json.len(), "saved layout");
                true
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not save layout");
                false
            }
        }
    }
}
