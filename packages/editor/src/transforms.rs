//! # Layout Transforms
//!
//! Pure functions computing a new layout from an old one plus an edit intent.
//!
//! ## Contract
//!
//! - When the target cannot be found, or the edit would not change anything,
//!   the input `Arc` itself is returned. Callers detect no-ops with
//!   `Arc::ptr_eq`.
//! - Otherwise only the nodes on the path from the root to the change are
//!   rebuilt. Every other section, row, column and component is the same `Arc`
//!   as before.
//! - Nodes are addressed by id, never by index path.
//!
//! [`LayoutEdit`] wraps each transform as a serializable intent so edits can
//! be queued, logged or sent over the wire and applied later.

use pagebuilder_model::layout::{clamp_span, DEFAULT_SPAN};
use pagebuilder_model::{
    create_column, create_default_component, create_row, create_section, Column, Component,
    ComponentType, ComponentUpdate, PageLayout, Row, Section,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Rebuild `items`, replacing each element `f` returns a new value for
///
/// Returns `None` when `f` replaced nothing.
fn replace_each<T>(
    items: &[Arc<T>],
    mut f: impl FnMut(&Arc<T>) -> Option<Arc<T>>,
) -> Option<Vec<Arc<T>>> {
    let mut changed = false;
    let next = items
        .iter()
        .map(|item| match f(item) {
            Some(replacement) => {
                changed = true;
                replacement
            }
            None => Arc::clone(item),
        })
        .collect();

    changed.then_some(next)
}

fn with_sections(layout: &PageLayout, sections: Vec<Arc<Section>>) -> Arc<PageLayout> {
    Arc::new(PageLayout {
        title: layout.title.clone(),
        sections,
    })
}

fn replace_sections(
    layout: &Arc<PageLayout>,
    f: impl FnMut(&Arc<Section>) -> Option<Arc<Section>>,
) -> Arc<PageLayout> {
    match replace_each(&layout.sections, f) {
        Some(sections) => with_sections(layout, sections),
        None => Arc::clone(layout),
    }
}

/// Replace within the section(s) carrying `section_id`
fn replace_in_section(
    layout: &Arc<PageLayout>,
    section_id: &str,
    mut f: impl FnMut(&Section) -> Option<Section>,
) -> Arc<PageLayout> {
    replace_sections(layout, |section| {
        if section.id != section_id {
            return None;
        }
        f(&**section).map(Arc::new)
    })
}

/// Replace within the row(s) carrying `row_id` inside section `section_id`
fn replace_in_row(
    layout: &Arc<PageLayout>,
    section_id: &str,
    row_id: &str,
    mut f: impl FnMut(&Row) -> Option<Row>,
) -> Arc<PageLayout> {
    replace_in_section(layout, section_id, |section| {
        replace_each(&section.rows, |row| {
            if row.id != row_id {
                return None;
            }
            f(&**row).map(Arc::new)
        })
        .map(|rows| section.with_rows(rows))
    })
}

/// Replace columns anywhere in the layout
fn replace_columns(
    layout: &Arc<PageLayout>,
    mut f: impl FnMut(&Arc<Column>) -> Option<Arc<Column>>,
) -> Arc<PageLayout> {
    replace_sections(layout, |section| {
        replace_each(&section.rows, |row| {
            replace_each(&row.columns, &mut f).map(|columns| Arc::new(row.with_columns(columns)))
        })
        .map(|rows| Arc::new(section.with_rows(rows)))
    })
}

fn bounded_index(index: i64, len: usize) -> usize {
    index.clamp(0, len as i64) as usize
}

pub fn set_title(layout: &Arc<PageLayout>, title: &str) -> Arc<PageLayout> {
    if layout.title == title {
        return Arc::clone(layout);
    }

    Arc::new(PageLayout {
        title: title.to_string(),
        sections: layout.sections.clone(),
    })
}

/// Append a section named "Section N"
pub fn add_section(layout: &Arc<PageLayout>) -> Arc<PageLayout> {
    let name = format!("Section {}", layout.sections.len() + 1);
    let mut sections = layout.sections.clone();
    sections.push(Arc::new(create_section(Some(&name))));
    with_sections(layout, sections)
}

pub fn delete_section(layout: &Arc<PageLayout>, section_id: &str) -> Arc<PageLayout> {
    if layout.find_section(section_id).is_none() {
        return Arc::clone(layout);
    }

    let sections = layout
        .sections
        .iter()
        .filter(|section| section.id != section_id)
        .cloned()
        .collect();
    with_sections(layout, sections)
}

pub fn add_row(layout: &Arc<PageLayout>, section_id: &str) -> Arc<PageLayout> {
    replace_in_section(layout, section_id, |section| {
        let mut rows = section.rows.clone();
        rows.push(Arc::new(create_row()));
        Some(section.with_rows(rows))
    })
}

pub fn delete_row(layout: &Arc<PageLayout>, section_id: &str, row_id: &str) -> Arc<PageLayout> {
    replace_in_section(layout, section_id, |section| {
        section.find_row(row_id)?;
        let rows = section
            .rows
            .iter()
            .filter(|row| row.id != row_id)
            .cloned()
            .collect();
        Some(section.with_rows(rows))
    })
}

/// Append a half-width column to a row
pub fn add_column(layout: &Arc<PageLayout>, section_id: &str, row_id: &str) -> Arc<PageLayout> {
    replace_in_row(layout, section_id, row_id, |row| {
        let mut columns = row.columns.clone();
        columns.push(Arc::new(create_column(DEFAULT_SPAN)));
        Some(row.with_columns(columns))
    })
}

pub fn delete_column(
    layout: &Arc<PageLayout>,
    section_id: &str,
    row_id: &str,
    column_id: &str,
) -> Arc<PageLayout> {
    replace_in_row(layout, section_id, row_id, |row| {
        if !row.columns.iter().any(|column| column.id == column_id) {
            return None;
        }
        let columns = row
            .columns
            .iter()
            .filter(|column| column.id != column_id)
            .cloned()
            .collect();
        Some(row.with_columns(columns))
    })
}

/// Set a column's span, clamped to 1..=12
pub fn set_column_span(
    layout: &Arc<PageLayout>,
    section_id: &str,
    row_id: &str,
    column_id: &str,
    span: i64,
) -> Arc<PageLayout> {
    let span = clamp_span(span);
    replace_in_row(layout, section_id, row_id, |row| {
        replace_each(&row.columns, |column| {
            if column.id != column_id || column.span == span {
                return None;
            }
            Some(Arc::new(Column {
                id: column.id.clone(),
                span,
                components: column.components.clone(),
            }))
        })
        .map(|columns| row.with_columns(columns))
    })
}

/// Insert a default component of `ty` into every column with `column_id`
///
/// `target_index` is clamped to `0..=len`; `None` appends.
pub fn add_component_to_column(
    layout: &Arc<PageLayout>,
    column_id: &str,
    ty: ComponentType,
    target_index: Option<i64>,
) -> Arc<PageLayout> {
    replace_columns(layout, |column| {
        if column.id != column_id {
            return None;
        }
        let mut components = column.components.clone();
        let at = target_index.map_or(components.len(), |index| {
            bounded_index(index, components.len())
        });
        components.insert(at, Arc::new(create_default_component(ty)));
        Some(Arc::new(column.with_components(components)))
    })
}

/// Move a component from one column to a position in another (or the same)
///
/// `target_index` is a slot in the target column as it looked before the
/// move; within one column, moving down shifts the slot up by one.
pub fn move_component(
    layout: &Arc<PageLayout>,
    source_column_id: &str,
    target_column_id: &str,
    component_id: &str,
    target_index: i64,
) -> Arc<PageLayout> {
    let same_column = source_column_id == target_column_id;

    // (index in source, source length after removal, component)
    let mut moved: Option<(usize, usize, Arc<Component>)> = None;
    let removed = replace_columns(layout, |column| {
        if column.id != source_column_id {
            return None;
        }
        let index = column.position_of(component_id)?;
        let mut components = column.components.clone();
        let component = components.remove(index);
        moved.get_or_insert((index, components.len(), component));
        Some(Arc::new(column.with_components(components)))
    });

    let Some((source_index, remaining, component)) = moved else {
        tracing::debug!(component_id, source_column_id, "move source not found");
        return Arc::clone(layout);
    };

    let mut index = target_index;
    if same_column && (source_index as i64) < target_index {
        index -= 1;
    }
    if same_column && bounded_index(index, remaining) == source_index {
        return Arc::clone(layout);
    }

    let mut inserted = false;
    let next = replace_columns(&removed, |column| {
        if column.id != target_column_id {
            return None;
        }
        let mut components = column.components.clone();
        let at = bounded_index(index, components.len());
        components.insert(at, Arc::clone(&component));
        inserted = true;
        Some(Arc::new(column.with_components(components)))
    });

    if !inserted {
        tracing::debug!(component_id, target_column_id, "move target not found");
        return Arc::clone(layout);
    }

    next
}

pub fn remove_component(
    layout: &Arc<PageLayout>,
    column_id: &str,
    component_id: &str,
) -> Arc<PageLayout> {
    replace_columns(layout, |column| {
        if column.id != column_id {
            return None;
        }
        column.position_of(component_id)?;
        let components = column
            .components
            .iter()
            .filter(|component| component.id != component_id)
            .cloned()
            .collect();
        Some(Arc::new(column.with_components(components)))
    })
}

/// Patch a component's fields
///
/// Ignored when the update was built for a different component type, which
/// happens when an editor panel outlives the component it was opened for.
pub fn update_component(
    layout: &Arc<PageLayout>,
    component_id: &str,
    update: &ComponentUpdate,
) -> Arc<PageLayout> {
    replace_columns(layout, |column| {
        replace_each(&column.components, |component| {
            if component.id != component_id {
                return None;
            }
            let Some(body) = update.apply_to(&component.body) else {
                tracing::debug!(
                    component_id,
                    expected = %update.component_type(),
                    found = %component.component_type(),
                    "ignoring update for mismatched component type"
                );
                return None;
            };
            if body == component.body {
                return None;
            }
            Some(Arc::new(Component {
                id: component.id.clone(),
                body,
            }))
        })
        .map(|components| Arc::new(column.with_components(components)))
    })
}

/// A single editing intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LayoutEdit {
    SetTitle {
        title: String,
    },

    AddSection,

    DeleteSection {
        section_id: String,
    },

    AddRow {
        section_id: String,
    },

    DeleteRow {
        section_id: String,
        row_id: String,
    },

    AddColumn {
        section_id: String,
        row_id: String,
    },

    DeleteColumn {
        section_id: String,
        row_id: String,
        column_id: String,
    },

    SetColumnSpan {
        section_id: String,
        row_id: String,
        column_id: String,
        span: i64,
    },

    AddComponent {
        column_id: String,
        component_type: ComponentType,
        #[serde(default)]
        target_index: Option<i64>,
    },

    MoveComponent {
        source_column_id: String,
        target_column_id: String,
        component_id: String,
        target_index: i64,
    },

    RemoveComponent {
        column_id: String,
        component_id: String,
    },

    UpdateComponent {
        component_id: String,
        update: ComponentUpdate,
    },
}

impl LayoutEdit {
    /// Run the matching transform
    pub fn apply(&self, layout: &Arc<PageLayout>) -> Arc<PageLayout> {
        match self {
            LayoutEdit::SetTitle { title } => set_title(layout, title),
            LayoutEdit::AddSection => add_section(layout),
            LayoutEdit::DeleteSection { section_id } => delete_section(layout, section_id),
            LayoutEdit::AddRow { section_id } => add_row(layout, section_id),
            LayoutEdit::DeleteRow { section_id, row_id } => delete_row(layout, section_id, row_id),
            LayoutEdit::AddColumn { section_id, row_id } => add_column(layout, section_id, row_id),
            LayoutEdit::DeleteColumn {
                section_id,
                row_id,
                column_id,
            } => delete_column(layout, section_id, row_id, column_id),
            LayoutEdit::SetColumnSpan {
                section_id,
                row_id,
                column_id,
                span,
            } => set_column_span(layout, section_id, row_id, column_id, *span),
            LayoutEdit::AddComponent {
                column_id,
                component_type,
                target_index,
            } => add_component_to_column(layout, column_id, *component_type, *target_index),
            LayoutEdit::MoveComponent {
                source_column_id,
                target_column_id,
                component_id,
                target_index,
            } => move_component(
                layout,
                source_column_id,
                target_column_id,
                component_id,
                *target_index,
            ),
            LayoutEdit::RemoveComponent {
                column_id,
                component_id,
            } => remove_component(layout, column_id, component_id),
            LayoutEdit::UpdateComponent {
                component_id,
                update,
            } => update_component(layout, component_id, update),
        }
    }

    /// Get a debug name for this edit
    pub fn name(&self) -> &'static str {
        match self {
            LayoutEdit::SetTitle { .. } => "setTitle",
            LayoutEdit::AddSection => "addSection",
            LayoutEdit::DeleteSection { .. } => "deleteSection",
            LayoutEdit::AddRow { .. } => "addRow",
            LayoutEdit::DeleteRow { .. } => "deleteRow",
            LayoutEdit::AddColumn { .. } => "addColumn",
            LayoutEdit::DeleteColumn { .. } => "deleteColumn",
            LayoutEdit::SetColumnSpan { .. } => "setColumnSpan",
            LayoutEdit::AddComponent { .. } => "addComponent",
            LayoutEdit::MoveComponent { .. } => "moveComponent",
            LayoutEdit::RemoveComponent { .. } => "removeComponent",
            LayoutEdit::UpdateComponent { .. } => "updateComponent",
        }
    }
}
