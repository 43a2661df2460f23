//! # Edit Session
//!
//! One open editor: the layout history, where it is persisted, and what the
//! user has selected.

use crate::config::HistoryConfig;
use crate::errors::EditorError;
use crate::history::History;
use crate::repository::{LayoutRepository, LoadOutcome, Storage};
use crate::transforms::LayoutEdit;
use pagebuilder_model::{
    create_initial_layout, create_travel_landing_layout, new_id, Component, ComponentUpdate,
    PageLayout,
};
use std::sync::Arc;

pub struct EditSession<S> {
    /// Unique session identifier
    pub id: String,

    history: History,

    repository: LayoutRepository<S>,

    /// Component id the user last selected
    selected_component: Option<String>,
}

impl<S: Storage> EditSession<S> {
    /// Start a session on a blank layout
    pub fn new(repository: LayoutRepository<S>, config: &HistoryConfig) -> Self {
        Self {
            id: new_id(),
            history: History::with_config(Arc::new(create_initial_layout()), config),
            repository,
            selected_component: None,
        }
    }

    pub fn layout(&self) -> &Arc<PageLayout> {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn repository(&self) -> &LayoutRepository<S> {
        &self.repository
    }

    pub fn apply(&mut self, edit: &LayoutEdit) -> bool {
        self.history.apply(edit)
    }

    /// Patch a component's fields, debounced against earlier edits to it
    pub fn update_component(&mut self, component_id: &str, update: &ComponentUpdate) -> bool {
        self.apply(&LayoutEdit::UpdateComponent {
            component_id: component_id.to_string(),
            update: update.clone(),
        })
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn select(&mut self, component_id: Option<&str>) {
        self.selected_component = component_id.map(str::to_string);
    }

    /// The selected component, if it still exists in the current layout
    pub fn selected_component(&self) -> Option<&Arc<Component>> {
        let id = self.selected_component.as_deref()?;
        self.history.current().find_component(id)
    }

    /// Replace the layout with the bundled travel template (undoable)
    pub fn load_travel_template(&mut self) -> Result<(), EditorError> {
        let layout = create_travel_landing_layout()?;
        self.history.load_template(layout);
        self.selected_component = None;
        Ok(())
    }

    /// Persist the current layout
    pub fn save(&self) -> bool {
        self.repository.save_layout(self.history.current())
    }

    /// Replace the session with the stored layout, if there is one
    ///
    /// History restarts from the loaded layout. A malformed or missing stored
    /// layout leaves the session untouched.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = self.repository.load_layout();
        if let Some(layout) = &outcome.layout {
            self.history.reset(Arc::new(layout.clone()));
            self.selected_component = None;
        }
        outcome
    }
}
