//! # Pagebuilder Editor
//!
//! Editing engine for page layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: layout tree + validation             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - LayoutEdit → transforms (copy path only) │
//! │  - History: bounded undo/redo, debounced    │
//! │  - LayoutRepository: validated load/save    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ preview: read-only outline of a saved page  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Layouts are immutable**: every edit builds a new root and shares
//!    untouched subtrees with the old one
//! 2. **No-ops are free**: an edit that changes nothing returns the same `Arc`
//!    and leaves history alone
//! 3. **Nothing invalid is persisted**: layouts are validated on save and
//!    repaired on load
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagebuilder_editor::{EditSession, HistoryConfig, LayoutEdit, LayoutRepository, MemoryStorage};
//!
//! let repository = LayoutRepository::new(MemoryStorage::new());
//! let mut session = EditSession::new(repository, &HistoryConfig::default());
//!
//! session.load_travel_template()?;
//! session.apply(&LayoutEdit::SetTitle { title: "Summer deals".into() });
//! session.undo();
//!
//! session.save();
//! ```

pub mod config;
pub mod errors;
pub mod history;
pub mod preview;
pub mod repository;
pub mod session;
pub mod transforms;

pub use config::{Config, HistoryConfig, StorageConfig, DEFAULT_CONFIG_NAME};
pub use errors::{EditorError, StorageError};
pub use history::History;
pub use preview::{render_outline, LayoutStats, PreviewPage};
pub use repository::{
    DirectoryStorage, LayoutRepository, LoadOutcome, MemoryStorage, Storage, LAYOUT_STORAGE_KEY,
};
pub use session::EditSession;
pub use transforms::LayoutEdit;
