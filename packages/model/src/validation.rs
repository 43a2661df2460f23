//! # Validation and Repair
//!
//! Turns untrusted input (usually persisted JSON) into a well-formed
//! [`PageLayout`].
//!
//! ## Policy
//!
//! - A non-object root fails with [`ValidationFailure::InvalidShape`].
//! - Nodes that fail shape checks (no id, unknown component type, not an
//!   object) are dropped individually; siblings survive.
//! - Fields are coerced: strings default to `""`, numbers to a per-field
//!   fallback, enums to their safe default, string lists lose non-strings.
//! - Numbers are clamped: span 1..=12 and rating 0..=5 and count 1..=10
//!   (rounded), spacer height 0..=600.
//! - Rows without columns and sections without rows are pruned. When no
//!   section survives the result fails with [`ValidationFailure::EmptyLayout`].
//!
//! `repaired` is accumulated while sanitizing: it is set whenever anything was
//! defaulted, coerced, clamped, dropped, or an unknown key was discarded.

use crate::component::{
    ButtonSize, ButtonVariant, Component, ComponentBody, ComponentType, PillTone, MAX_RATING,
    MAX_SPACER_HEIGHT, MAX_STAR_COUNT, MIN_STAR_COUNT,
};
use crate::layout::{Column, PageLayout, Row, Section, DEFAULT_SPAN, MAX_SPAN, MIN_SPAN};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Why no layout could be recovered
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Layout is not valid JSON")]
    ParseError,

    #[error("Layout root is not an object")]
    InvalidShape,

    #[error("Layout has no valid sections")]
    EmptyLayout,
}

/// Outcome of validating one input
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// The sanitized layout, `None` on failure
    pub layout: Option<PageLayout>,

    /// True when the output differs from the input
    pub repaired: bool,

    /// Set only when `layout` is `None`
    pub reason: Option<ValidationFailure>,
}

impl ValidationResult {
    fn failed(reason: ValidationFailure) -> Self {
        Self {
            layout: None,
            repaired: false,
            reason: Some(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.layout.is_some()
    }
}

const LAYOUT_KEYS: &[&str] = &["title", "sections"];
const SECTION_KEYS: &[&str] = &["id", "name", "label", "rows"];
const ROW_KEYS: &[&str] = &["id", "label", "columns"];
const COLUMN_KEYS: &[&str] = &["id", "span", "components"];

fn component_keys(ty: ComponentType) -> &'static [&'static str] {
    match ty {
        ComponentType::Text => &["id", "type", "text"],
        ComponentType::Button => &["id", "type", "label", "url", "variant", "size"],
        ComponentType::RatingStars => &["id", "type", "rating", "count"],
        ComponentType::Image => &["id", "type", "src", "alt"],
        ComponentType::Gallery => &["id", "type", "images"],
        ComponentType::Spacer => &["id", "type", "height"],
        ComponentType::Pill => &["id", "type", "label", "tone"],
        ComponentType::InputField => &["id", "type", "label", "placeholder"],
        ComponentType::IconText => &["id", "type", "icon", "text"],
        ComponentType::PriceTag => &["id", "type", "amount", "suffix"],
    }
}

const BUTTON_VARIANTS: &[(&str, ButtonVariant)] = &[
    ("primary", ButtonVariant::Primary),
    ("success", ButtonVariant::Success),
    ("ghost", ButtonVariant::Ghost),
];
const BUTTON_SIZES: &[(&str, ButtonSize)] = &[("sm", ButtonSize::Sm), ("md", ButtonSize::Md)];
const PILL_TONES: &[(&str, PillTone)] = &[("default", PillTone::Default), ("active", PillTone::Active)];

/// Validate a parsed JSON value
pub fn validate_and_repair(input: &Value) -> ValidationResult {
    let Some(obj) = input.as_object() else {
        return ValidationResult::failed(ValidationFailure::InvalidShape);
    };

    let mut sanitizer = Sanitizer::default();
    let items = sanitizer.children(obj, "sections");
    let sections = sanitizer.list(items, "section", Sanitizer::section);

    if sections.is_empty() {
        return ValidationResult::failed(ValidationFailure::EmptyLayout);
    }

    sanitizer.check_keys(obj, LAYOUT_KEYS);
    let layout = PageLayout {
        title: sanitizer.string(obj, "title", ""),
        sections,
    };

    ValidationResult {
        layout: Some(layout),
        repaired: sanitizer.repaired,
        reason: None,
    }
}

/// Validate an in-memory layout (e.g. before persisting it)
pub fn validate_layout(layout: &PageLayout) -> ValidationResult {
    match serde_json::to_value(layout) {
        Ok(value) => validate_and_repair(&value),
        Err(_) => ValidationResult::failed(ValidationFailure::InvalidShape),
    }
}

/// Parse raw text and validate it
pub fn parse_and_validate(raw: &str) -> ValidationResult {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => validate_and_repair(&value),
        Err(_) => ValidationResult::failed(ValidationFailure::ParseError),
    }
}

#[derive(Default)]
struct Sanitizer {
    repaired: bool,
}

impl Sanitizer {
    fn mark(&mut self) {
        self.repaired = true;
    }

    fn check_keys(&mut self, obj: &Map<String, Value>, allowed: &[&str]) {
        if obj.keys().any(|key| !allowed.contains(&key.as_str())) {
            self.mark();
        }
    }

    fn list<T>(
        &mut self,
        items: &[Value],
        kind: &str,
        sanitize: impl Fn(&mut Self, &Value) -> Option<T>,
    ) -> Vec<Arc<T>> {
        let mut nodes = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match sanitize(self, item) {
                Some(node) => nodes.push(Arc::new(node)),
                None => {
                    tracing::debug!(kind, index, "dropping malformed layout node");
                    self.mark();
                }
            }
        }
        nodes
    }

    fn children<'a>(&mut self, obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
        match obj.get(key) {
            Some(Value::Array(items)) => items,
            _ => {
                self.mark();
                &[]
            }
        }
    }

    fn id(&self, obj: &Map<String, Value>) -> Option<String> {
        match obj.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            _ => None,
        }
    }

    fn string(&mut self, obj: &Map<String, Value>, key: &str, fallback: &str) -> String {
        match obj.get(key) {
            Some(Value::String(value)) => value.clone(),
            _ => {
                self.mark();
                fallback.to_string()
            }
        }
    }

    /// Optional label; kept only when it is a non-empty string
    fn label(&mut self, obj: &Map<String, Value>) -> Option<String> {
        match obj.get("label") {
            None => None,
            Some(Value::String(label)) if !label.is_empty() => Some(label.clone()),
            Some(_) => {
                self.mark();
                None
            }
        }
    }

    fn number(&mut self, obj: &Map<String, Value>, key: &str, fallback: f64) -> f64 {
        match obj.get(key).and_then(Value::as_f64) {
            Some(value) if value.is_finite() => value,
            _ => {
                self.mark();
                fallback
            }
        }
    }

    fn bounded(&mut self, obj: &Map<String, Value>, key: &str, fallback: f64, min: f64, max: f64) -> f64 {
        let raw = self.number(obj, key, fallback);
        let value = raw.clamp(min, max);
        if value != raw {
            self.mark();
        }
        value
    }

    fn rounded(&mut self, obj: &Map<String, Value>, key: &str, fallback: f64, min: u8, max: u8) -> u8 {
        let raw = self.number(obj, key, fallback);
        let value = raw.round().clamp(min as f64, max as f64);
        if value != raw {
            self.mark();
        }
        value as u8
    }

    fn choice<T: Copy>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
        options: &[(&str, T)],
        fallback: T,
    ) -> T {
        let found = obj
            .get(key)
            .and_then(Value::as_str)
            .and_then(|tag| options.iter().find(|(name, _)| *name == tag));

        match found {
            Some((_, value)) => *value,
            None => {
                self.mark();
                fallback
            }
        }
    }

    fn string_list(&mut self, obj: &Map<String, Value>, key: &str) -> Vec<String> {
        match obj.get(key) {
            Some(Value::Array(items)) => {
                let strings: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect();
                if strings.len() != items.len() {
                    self.mark();
                }
                strings
            }
            _ => {
                self.mark();
                Vec::new()
            }
        }
    }

    fn section(&mut self, value: &Value) -> Option<Section> {
        let obj = value.as_object()?;
        let id = self.id(obj)?;

        let items = self.children(obj, "rows");
        let rows = self.list(items, "row", Self::row);
        if rows.is_empty() {
            return None;
        }

        self.check_keys(obj, SECTION_KEYS);
        Some(Section {
            id,
            name: self.string(obj, "name", "Section"),
            label: self.label(obj),
            rows,
        })
    }

    fn row(&mut self, value: &Value) -> Option<Row> {
        let obj = value.as_object()?;
        let id = self.id(obj)?;

        let items = self.children(obj, "columns");
        let columns = self.list(items, "column", Self::column);
        if columns.is_empty() {
            return None;
        }

        self.check_keys(obj, ROW_KEYS);
        Some(Row {
            id,
            label: self.label(obj),
            columns,
        })
    }

    fn column(&mut self, value: &Value) -> Option<Column> {
        let obj = value.as_object()?;
        let id = self.id(obj)?;

        self.check_keys(obj, COLUMN_KEYS);
        let span = self.rounded(obj, "span", DEFAULT_SPAN as f64, MIN_SPAN, MAX_SPAN);
        let items = self.children(obj, "components");
        let components = self.list(items, "component", Self::component);

        Some(Column {
            id,
            span,
            components,
        })
    }

    fn component(&mut self, value: &Value) -> Option<Component> {
        let obj = value.as_object()?;
        let id = self.id(obj)?;
        let ty = obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(ComponentType::from_tag)?;

        self.check_keys(obj, component_keys(ty));
        let body = match ty {
            ComponentType::Text => ComponentBody::Text {
                text: self.string(obj, "text", ""),
            },
            ComponentType::Button => ComponentBody::Button {
                label: self.string(obj, "label", ""),
                url: self.string(obj, "url", ""),
                variant: self.choice(obj, "variant", BUTTON_VARIANTS, ButtonVariant::Primary),
                size: self.choice(obj, "size", BUTTON_SIZES, ButtonSize::Md),
            },
            ComponentType::RatingStars => ComponentBody::RatingStars {
                rating: self.rounded(obj, "rating", 0.0, 0, MAX_RATING),
                count: self.rounded(obj, "count", 5.0, MIN_STAR_COUNT, MAX_STAR_COUNT),
            },
            ComponentType::Image => ComponentBody::Image {
                src: self.string(obj, "src", ""),
                alt: self.string(obj, "alt", ""),
            },
            ComponentType::Gallery => ComponentBody::Gallery {
                images: self.string_list(obj, "images"),
            },
            ComponentType::Spacer => ComponentBody::Spacer {
                height: self.bounded(obj, "height", 24.0, 0.0, MAX_SPACER_HEIGHT),
            },
            ComponentType::Pill => ComponentBody::Pill {
                label: self.string(obj, "label", ""),
                tone: self.choice(obj, "tone", PILL_TONES, PillTone::Default),
            },
            ComponentType::InputField => ComponentBody::InputField {
                label: self.string(obj, "label", ""),
                placeholder: self.string(obj, "placeholder", ""),
            },
            ComponentType::IconText => ComponentBody::IconText {
                icon: self.string(obj, "icon", ""),
                text: self.string(obj, "text", ""),
            },
            ComponentType::PriceTag => ComponentBody::PriceTag {
                amount: self.string(obj, "amount", ""),
                suffix: self.string(obj, "suffix", ""),
            },
        };

        Some(Component { id, body })
    }
}
