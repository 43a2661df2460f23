//! # Pagebuilder Model
//!
//! The layout tree edited by the page builder, plus everything needed to
//! create and trust one:
//!
//! ```text
//! PageLayout
//!   └─ Section (name, label?)
//!        └─ Row (label?)
//!             └─ Column (span 1..=12)
//!                  └─ Component (text, button, ratingStars, ...)
//! ```
//!
//! - [`layout`] / [`component`]: node types. Children are held in `Arc` so
//!   edits can share every untouched subtree with the previous version.
//! - [`factories`]: fresh nodes with new ids and variant defaults.
//! - [`validation`]: turns untrusted JSON into a well-formed layout, repairing
//!   what it can.
//! - [`template`]: bundled starter layouts.
//! - [`visitor`]: read-only traversal in section → row → column → component order.

pub mod component;
pub mod error;
pub mod factories;
pub mod layout;
pub mod template;
pub mod validation;
pub mod visitor;

pub use component::{
    ButtonSize, ButtonVariant, Component, ComponentBody, ComponentType, ComponentUpdate,
    PillTone,
};
pub use error::ModelError;
pub use factories::{
    create_column, create_default_component, create_initial_layout, create_row, create_section,
    new_id,
};
pub use layout::{Column, PageLayout, Row, Section};
pub use template::{create_travel_landing_layout, LayoutTemplate};
pub use validation::{
    parse_and_validate, validate_and_repair, validate_layout, ValidationFailure, ValidationResult,
};
pub use visitor::LayoutVisitor;
