//! Constructors for new layout nodes. Every node gets a fresh id.

use crate::component::{Component, ComponentBody, ComponentType};
use crate::layout::{Column, PageLayout, Row, Section, DEFAULT_SPAN};
use std::sync::Arc;
use uuid::Uuid;

/// Generate a new node id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn create_default_component(ty: ComponentType) -> Component {
    Component {
        id: new_id(),
        body: ComponentBody::default_for(ty),
    }
}

pub fn create_column(span: u8) -> Column {
    Column {
        id: new_id(),
        span,
        components: Vec::new(),
    }
}

/// A row split into two half-width columns
pub fn create_row() -> Row {
    Row {
        id: new_id(),
        label: Some("Row".to_string()),
        columns: vec![
            Arc::new(create_column(DEFAULT_SPAN)),
            Arc::new(create_column(DEFAULT_SPAN)),
        ],
    }
}

pub fn create_section(name: Option<&str>) -> Section {
    let name = name.unwrap_or("Section").to_string();
    Section {
        id: new_id(),
        label: Some(name.clone()),
        name,
        rows: vec![Arc::new(create_row())],
    }
}

/// Blank page the editor opens with
pub fn create_initial_layout() -> PageLayout {
    PageLayout {
        title: String::new(),
        sections: vec![Arc::new(create_section(None))],
    }
}
