use crate::component::Component;
use crate::layout::{Column, PageLayout, Row, Section};

/// Visitor pattern for reading a layout
///
/// The default implementations walk the whole tree in document order:
/// section → row → column → component. Override specific visit_* methods to
/// act on nodes; call the matching `walk_*` function to keep descending.
pub trait LayoutVisitor: Sized {
    fn visit_layout(&mut self, layout: &PageLayout) {
        walk_layout(self, layout);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_component(&mut self, _component: &Component) {
        // Leaf node, no children to walk
    }
}

pub fn walk_layout<V: LayoutVisitor>(visitor: &mut V, layout: &PageLayout) {
    for section in &layout.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: LayoutVisitor>(visitor: &mut V, section: &Section) {
    for row in &section.rows {
        visitor.visit_row(row);
    }
}

pub fn walk_row<V: LayoutVisitor>(visitor: &mut V, row: &Row) {
    for column in &row.columns {
        visitor.visit_column(column);
    }
}

pub fn walk_column<V: LayoutVisitor>(visitor: &mut V, column: &Column) {
    for component in &column.components {
        visitor.visit_component(component);
    }
}
