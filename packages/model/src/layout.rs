//! # Layout Tree
//!
//! `PageLayout → Section → Row → Column → Component`, a strict tree with no
//! back references. Nodes are never mutated in place once they are part of a
//! layout: an edit builds a new node with the same id and swaps it in, so
//! children are held in `Arc` and unchanged subtrees are shared between the
//! old and new versions.

use crate::component::Component;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MIN_SPAN: u8 = 1;
pub const MAX_SPAN: u8 = 12;
pub const DEFAULT_SPAN: u8 = 6;

/// Clamp a requested span onto the 12-unit grid
pub fn clamp_span(span: i64) -> u8 {
    span.clamp(MIN_SPAN as i64, MAX_SPAN as i64) as u8
}

/// Full page: a title and its sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub title: String,
    pub sections: Vec<Arc<Section>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub rows: Vec<Arc<Row>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub columns: Vec<Arc<Column>>,
}

/// A grid cell holding components; may be empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,

    /// Width in twelfths of the row
    pub span: u8,

    pub components: Vec<Arc<Component>>,
}

impl PageLayout {
    /// Every column in document order
    pub fn columns(&self) -> impl Iterator<Item = &Arc<Column>> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .flat_map(|row| row.columns.iter())
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Arc<Section>> {
        self.sections.iter().find(|section| section.id == section_id)
    }

    /// First column with the given id, searching all sections and rows
    pub fn find_column(&self, column_id: &str) -> Option<&Arc<Column>> {
        self.columns().find(|column| column.id == column_id)
    }

    pub fn find_component(&self, component_id: &str) -> Option<&Arc<Component>> {
        self.columns()
            .flat_map(|column| column.components.iter())
            .find(|component| component.id == component_id)
    }

    pub fn component_count(&self) -> usize {
        self.columns().map(|column| column.components.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Section {
    /// Same section with a new row list
    pub fn with_rows(&self, rows: Vec<Arc<Row>>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            label: self.label.clone(),
            rows,
        }
    }

    pub fn find_row(&self, row_id: &str) -> Option<&Arc<Row>> {
        self.rows.iter().find(|row| row.id == row_id)
    }
}

impl Row {
    /// Same row with a new column list
    pub fn with_columns(&self, columns: Vec<Arc<Column>>) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            columns,
        }
    }
}

impl Column {
    /// Same column with a new component list
    pub fn with_components(&self, components: Vec<Arc<Component>>) -> Self {
        Self {
            id: self.id.clone(),
            span: self.span,
            components,
        }
    }

    pub fn position_of(&self, component_id: &str) -> Option<usize> {
        self.components
            .iter()
            .position(|component| component.id == component_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentBody, ComponentType};

    fn sample_layout() -> PageLayout {
        let component = Arc::new(Component {
            id: "k1".to_string(),
            body: ComponentBody::default_for(ComponentType::Text),
        });
        let column = Arc::new(Column {
            id: "c1".to_string(),
            span: 6,
            components: vec![component],
        });
        let row = Arc::new(Row {
            id: "r1".to_string(),
            label: None,
            columns: vec![column],
        });
        PageLayout {
            title: "Home".to_string(),
            sections: vec![Arc::new(Section {
                id: "s1".to_string(),
                name: "Hero".to_string(),
                label: Some("Top".to_string()),
                rows: vec![row],
            })],
        }
    }

    #[test]
    fn test_clamp_span() {
        assert_eq!(clamp_span(999), 12);
        assert_eq!(clamp_span(-100), 1);
        assert_eq!(clamp_span(0), 1);
        assert_eq!(clamp_span(7), 7);
    }

    #[test]
    fn test_lookup_by_id() {
        let layout = sample_layout();

        assert!(layout.find_section("s1").is_some());
        assert_eq!(layout.find_column("c1").map(|c| c.span), Some(6));
        assert_eq!(layout.find_component("k1").map(|k| k.id.as_str()), Some("k1"));
        assert!(layout.find_component("missing").is_none());
        assert_eq!(layout.component_count(), 1);
    }

    #[test]
    fn test_absent_label_is_omitted_from_json() {
        let layout = sample_layout();
        let json = serde_json::to_value(&layout).unwrap();

        let row = &json["sections"][0]["rows"][0];
        assert!(row.get("label").is_none());
        assert_eq!(json["sections"][0]["label"], "Top");
    }
}
