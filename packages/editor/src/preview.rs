//! # Read-only Preview
//!
//! Renders a layout as an indented text outline and summarizes it, both via
//! [`LayoutVisitor`] so traversal order matches the editor canvas.

use crate::repository::LoadOutcome;
use pagebuilder_model::visitor::{walk_column, walk_layout, walk_row, walk_section};
use pagebuilder_model::{
    Column, Component, ComponentBody, ComponentType, LayoutVisitor, PageLayout, Row, Section,
};
use std::collections::HashMap;
use std::fmt::Write;

pub const EMPTY_LAYOUT_MESSAGE: &str =
    "Layout is empty or malformed. Return to editor and load a valid template.";
pub const NO_SAVED_PAGE_MESSAGE: &str = "No saved page yet";
pub const INVALID_SAVED_PAGE_MESSAGE: &str = "Saved page is invalid";
pub const REPAIRED_NOTICE: &str = "Saved layout had minor issues and was auto-repaired for preview.";

/// What the preview surface shows for a stored layout
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewPage {
    NothingStored,
    Invalid,
    Ready { layout: PageLayout, repaired: bool },
}

impl From<LoadOutcome> for PreviewPage {
    fn from(outcome: LoadOutcome) -> Self {
        match outcome.layout {
            Some(layout) => PreviewPage::Ready {
                layout,
                repaired: outcome.repaired,
            },
            None if outcome.malformed => PreviewPage::Invalid,
            None => PreviewPage::NothingStored,
        }
    }
}

impl PreviewPage {
    /// Banner shown above a rendered layout
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            PreviewPage::Ready { repaired: true, .. } => Some(REPAIRED_NOTICE),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        match self {
            PreviewPage::NothingStored => NO_SAVED_PAGE_MESSAGE.to_string(),
            PreviewPage::Invalid => INVALID_SAVED_PAGE_MESSAGE.to_string(),
            PreviewPage::Ready { layout, .. } => render_outline(layout),
        }
    }
}

/// Render `layout` as an indented outline
pub fn render_outline(layout: &PageLayout) -> String {
    if layout.sections.is_empty() {
        return EMPTY_LAYOUT_MESSAGE.to_string();
    }

    let mut outline = Outline::default();
    outline.visit_layout(layout);
    outline.out
}

#[derive(Default)]
struct Outline {
    out: String,
}

impl Outline {
    fn line(&mut self, depth: usize, text: &str) {
        let _ = writeln!(self.out, "{}{}", "  ".repeat(depth), text);
    }
}

impl LayoutVisitor for Outline {
    fn visit_layout(&mut self, layout: &PageLayout) {
        let title = if layout.title.is_empty() {
            "(untitled)"
        } else {
            layout.title.as_str()
        };
        self.line(0, title);
        walk_layout(self, layout);
    }

    fn visit_section(&mut self, section: &Section) {
        let heading = match section.label.as_deref() {
            Some(label) if label != section.name => format!("== {} · {} ==", section.name, label),
            _ => format!("== {} ==", section.name),
        };
        self.line(0, &heading);
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        self.line(1, row.label.as_deref().unwrap_or("Row"));
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        self.line(2, &format!("[{}/12]", column.span));
        if column.components.is_empty() {
            self.line(3, "(empty)");
        }
        walk_column(self, column);
    }

    fn visit_component(&mut self, component: &Component) {
        let text = format!(
            "- {}: {}",
            component.component_type(),
            describe(&component.body)
        );
        self.line(3, &text);
    }
}

/// One-line human summary of a component's fields
pub fn describe(body: &ComponentBody) -> String {
    match body {
        ComponentBody::Text { text } => format!("{:?}", text),
        ComponentBody::Button {
            label,
            url,
            variant,
            size,
        } => format!("[{}]({}) {}/{}", label, url, lower(variant), lower(size)),
        ComponentBody::RatingStars { rating, count } => {
            let filled = usize::from((*rating).min(*count));
            let empty = usize::from(*count) - filled;
            format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
        }
        ComponentBody::Image { src, alt } => format!("{} ({:?})", src, alt),
        ComponentBody::Gallery { images } => format!("{} images", images.len()),
        ComponentBody::Spacer { height } => format!("{}px", height),
        ComponentBody::Pill { label, tone } => format!("{} ({})", label, lower(tone)),
        ComponentBody::InputField { label, placeholder } => {
            format!("{} <{}>", label, placeholder)
        }
        ComponentBody::IconText { icon, text } => format!("{} {}", icon, text),
        ComponentBody::PriceTag { amount, suffix } => format!("{} {}", amount, suffix),
    }
}

fn lower(value: impl std::fmt::Debug) -> String {
    format!("{:?}", value).to_lowercase()
}

/// Node counts for a layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub sections: usize,
    pub rows: usize,
    pub columns: usize,
    pub components: usize,
    by_type: HashMap<ComponentType, usize>,
}

impl LayoutStats {
    pub fn collect(layout: &PageLayout) -> Self {
        let mut stats = Self::default();
        stats.visit_layout(layout);
        stats
    }

    pub fn count_of(&self, ty: ComponentType) -> usize {
        self.by_type.get(&ty).copied().unwrap_or(0)
    }

    /// Non-zero per-type counts in declaration order
    pub fn by_type(&self) -> impl Iterator<Item = (ComponentType, usize)> + '_ {
        ComponentType::ALL
            .into_iter()
            .map(|ty| (ty, self.count_of(ty)))
            .filter(|(_, count)| *count > 0)
    }
}

impl LayoutVisitor for LayoutStats {
    fn visit_section(&mut self, section: &Section) {
        self.sections += 1;
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        self.rows += 1;
        walk_row(self, row);
    }

    fn visit_column(&mut self, column: &Column) {
        self.columns += 1;
        walk_column(self, column);
    }

    fn visit_component(&mut self, component: &Component) {
        self.components += 1;
        *self.by_type.entry(component.component_type()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagebuilder_model::{create_initial_layout, create_travel_landing_layout};

    #[test]
    fn test_empty_layout_message() {
        let layout = PageLayout {
            title: "Nothing".to_string(),
            sections: Vec::new(),
        };
        assert_eq!(render_outline(&layout), EMPTY_LAYOUT_MESSAGE);
    }

    #[test]
    fn test_outline_of_initial_layout() {
        let outline = render_outline(&create_initial_layout());
        let lines: Vec<&str> = outline.lines().collect();

        assert_eq!(
            lines,
            vec![
                "(untitled)",
                "== Section ==",
                "  Row",
                "    [6/12]",
                "      (empty)",
                "    [6/12]",
                "      (empty)",
            ]
        );
    }

    #[test]
    fn test_outline_follows_document_order() {
        let layout = create_travel_landing_layout().unwrap();
        let outline = render_outline(&layout);

        let hero = outline.find("== Hero · Travel Hero ==").unwrap();
        let footer = outline.find("== Footer").unwrap();
        assert!(outline.starts_with("Travel Landing Page\n"));
        assert!(hero < footer);
    }

    #[test]
    fn test_describe_components() {
        assert_eq!(
            describe(&ComponentBody::default_for(ComponentType::RatingStars)),
            "★★★★☆"
        );
        assert_eq!(
            describe(&ComponentBody::default_for(ComponentType::Button)),
            "[]() primary/md"
        );
        assert_eq!(
            describe(&ComponentBody::default_for(ComponentType::Spacer)),
            "24px"
        );
        assert_eq!(
            describe(&ComponentBody::default_for(ComponentType::Pill)),
            "Label (default)"
        );
    }

    #[test]
    fn test_preview_page_states() {
        assert_eq!(
            PreviewPage::from(LoadOutcome::default()),
            PreviewPage::NothingStored
        );
        assert_eq!(
            PreviewPage::from(LoadOutcome {
                layout: None,
                repaired: false,
                malformed: true,
            })
            .render(),
            INVALID_SAVED_PAGE_MESSAGE
        );

        let page = PreviewPage::from(LoadOutcome {
            layout: Some(create_initial_layout()),
            repaired: true,
            malformed: false,
        });
        assert_eq!(page.notice(), Some(REPAIRED_NOTICE));
        assert!(page.render().contains("== Section =="));
    }

    #[test]
    fn test_stats() {
        let layout = create_travel_landing_layout().unwrap();
        let stats = LayoutStats::collect(&layout);

        assert_eq!(stats.sections, 5);
        assert_eq!(stats.components, layout.component_count());
        assert_eq!(stats.by_type().count(), ComponentType::ALL.len());
        assert_eq!(LayoutStats::collect(&create_initial_layout()).components, 0);
    }
}
