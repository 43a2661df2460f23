pub mod apply;
pub mod init;
pub mod preview;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::Result;
use pagebuilder_editor::{Config, DirectoryStorage, LayoutRepository};
use std::path::{Path, PathBuf};

/// Working directory plus the config every command reads from
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
}

impl Context {
    /// Load config from `cwd`, applying command-line overrides
    pub fn load(cwd: &Path, store: Option<PathBuf>, key: Option<String>) -> Result<Self> {
        let mut config = Config::load(cwd)?;

        if let Some(store) = store {
            config.storage.dir = store.display().to_string();
        }
        if let Some(key) = key {
            config.storage.key = key;
        }

        Ok(Self {
            cwd: cwd.to_path_buf(),
            config,
        })
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.config.storage_dir(&self.cwd)
    }

    pub fn repository(&self) -> LayoutRepository<DirectoryStorage> {
        LayoutRepository::with_key(
            DirectoryStorage::new(self.storage_dir()),
            self.config.storage.key.clone(),
        )
    }
}
