//! # Undo/Redo History
//!
//! Holds the current layout together with bounded stacks of earlier and
//! undone layouts.
//!
//! ## Design
//!
//! - Every edit runs a transform on `current`. A result that is the same `Arc`
//!   is a no-op and leaves the stacks untouched.
//! - A real change pushes the old `current` onto `past` and clears `future`.
//! - Component field edits are debounced: edits to one component within the
//!   debounce window share the checkpoint taken by the first of them.
//! - Snapshots share structure with `current`. Layout nodes are never mutated
//!   once built, so a snapshot cannot observe later edits.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(Arc::new(create_initial_layout()));
//!
//! history.apply(&LayoutEdit::SetTitle { title: "Landing".into() });
//! history.undo();
//! history.redo();
//! ```

use crate::config::HistoryConfig;
use crate::transforms::{update_component, LayoutEdit};
use pagebuilder_model::{ComponentUpdate, PageLayout};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Undo/redo history for one open layout
#[derive(Debug)]
pub struct History {
    /// Earlier layouts (most recent last)
    past: VecDeque<Arc<PageLayout>>,

    current: Arc<PageLayout>,

    /// Undone layouts (most recent first)
    future: VecDeque<Arc<PageLayout>>,

    /// Maximum levels kept on each stack (0 = unlimited)
    capacity: usize,

    debounce: Duration,

    /// Component id and time of the last field edit
    last_component_edit: Option<(String, Instant)>,
}

impl History {
    /// Create a history with default capacity (100) and debounce (450ms)
    pub fn new(layout: Arc<PageLayout>) -> Self {
        Self::with_config(layout, &HistoryConfig::default())
    }

    pub fn with_config(layout: Arc<PageLayout>, config: &HistoryConfig) -> Self {
        Self {
            past: VecDeque::new(),
            current: layout,
            future: VecDeque::new(),
            capacity: config.capacity,
            debounce: config.debounce(),
            last_component_edit: None,
        }
    }

    pub fn current(&self) -> &Arc<PageLayout> {
        &self.current
    }

    pub fn past(&self) -> &VecDeque<Arc<PageLayout>> {
        &self.past
    }

    pub fn future(&self) -> &VecDeque<Arc<PageLayout>> {
        &self.future
    }

    /// Apply an edit, returning whether the layout changed
    pub fn apply(&mut self, edit: &LayoutEdit) -> bool {
        if let LayoutEdit::UpdateComponent {
            component_id,
            update,
        } = edit
        {
            return self.update_component_at(component_id, update, Instant::now());
        }

        let next = edit.apply(&self.current);
        let changed = self.commit(next);
        if !changed {
            tracing::debug!(edit = edit.name(), "edit had no effect");
        }
        changed
    }

    /// Patch a component's fields as of `now`
    ///
    /// Only the first edit of a burst against one component records a
    /// checkpoint. A different component or a pause longer than the debounce
    /// window starts a new burst.
    pub fn update_component_at(
        &mut self,
        component_id: &str,
        update: &ComponentUpdate,
        now: Instant,
    ) -> bool {
        let next = update_component(&self.current, component_id, update);

        let checkpoint = match &self.last_component_edit {
            Some((last_id, at)) => {
                last_id != component_id || now.saturating_duration_since(*at) > self.debounce
            }
            None => true,
        };
        self.last_component_edit = Some((component_id.to_string(), now));

        if Arc::ptr_eq(&next, &self.current) {
            return false;
        }

        if checkpoint {
            let previous = std::mem::replace(&mut self.current, next);
            self.push_past(previous);
            self.future.clear();
        } else {
            self.current = next;
        }
        true
    }

    /// Replace the current layout with a freshly built one, as an undoable step
    pub fn load_template(&mut self, layout: PageLayout) {
        self.commit(Arc::new(layout));
    }

    /// Start over from `layout` with empty stacks
    pub fn reset(&mut self, layout: Arc<PageLayout>) {
        self.current = layout;
        self.clear();
    }

    /// Undo the most recent change
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };

        let undone = std::mem::replace(&mut self.current, previous);
        self.future.push_front(undone);
        if self.capacity > 0 {
            self.future.truncate(self.capacity);
        }
        true
    }

    /// Redo the most recently undone change
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };

        let previous = std::mem::replace(&mut self.current, next);
        self.push_past(previous);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    /// Clear all undo/redo history, keeping the current layout
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.last_component_edit = None;
    }

    fn commit(&mut self, next: Arc<PageLayout>) -> bool {
        if Arc::ptr_eq(&next, &self.current) {
            return false;
        }

        let previous = std::mem::replace(&mut self.current, next);
        self.push_past(previous);
        self.future.clear();
        true
    }

    fn push_past(&mut self, layout: Arc<PageLayout>) {
        self.past.push_back(layout);

        if self.capacity > 0 && self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}
