//! # Layout Templates
//!
//! A template is a layout without ids. Instantiating one assigns fresh ids to
//! every node, so the same template can be loaded any number of times.

use crate::component::{Component, ComponentBody};
use crate::error::ModelError;
use crate::factories::new_id;
use crate::layout::{clamp_span, Column, PageLayout, Row, Section};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TRAVEL_LANDING: &str = include_str!("../templates/travel_landing.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    pub title: String,
    pub sections: Vec<TemplateSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub name: String,

    #[serde(default)]
    pub label: Option<String>,

    pub rows: Vec<TemplateRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRow {
    #[serde(default)]
    pub label: Option<String>,

    pub columns: Vec<TemplateColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateColumn {
    pub span: u8,
    pub components: Vec<ComponentBody>,
}

impl LayoutTemplate {
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The bundled "Travel Landing Page" template
    pub fn travel_landing() -> Result<Self, ModelError> {
        Self::from_json(TRAVEL_LANDING)
    }

    /// Build a layout from this template with fresh ids
    pub fn instantiate(&self) -> PageLayout {
        PageLayout {
            title: self.title.clone(),
            sections: self
                .sections
                .iter()
                .map(|section| Arc::new(section.instantiate()))
                .collect(),
        }
    }
}

impl TemplateSection {
    fn instantiate(&self) -> Section {
        Section {
            id: new_id(),
            name: self.name.clone(),
            label: self.label.clone(),
            rows: self.rows.iter().map(|row| Arc::new(row.instantiate())).collect(),
        }
    }
}

impl TemplateRow {
    fn instantiate(&self) -> Row {
        Row {
            id: new_id(),
            label: self.label.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| Arc::new(column.instantiate()))
                .collect(),
        }
    }
}

impl TemplateColumn {
    fn instantiate(&self) -> Column {
        Column {
            id: new_id(),
            span: clamp_span(self.span as i64),
            components: self
                .components
                .iter()
                .map(|body| {
                    Arc::new(Component {
                        id: new_id(),
                        body: body.clone(),
                    })
                })
                .collect(),
        }
    }
}

/// Convenience for [`LayoutTemplate::travel_landing`] + instantiate
pub fn create_travel_landing_layout() -> Result<PageLayout, ModelError> {
    Ok(LayoutTemplate::travel_landing()?.instantiate())
}
