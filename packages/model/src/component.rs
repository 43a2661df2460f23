//! # Components
//!
//! Leaf content placed inside columns. A component is an id plus a
//! [`ComponentBody`], a closed union over ten kinds tagged by `type` in JSON:
//!
//! ```json
//! { "id": "k1", "type": "button", "label": "Go", "url": "#", "variant": "primary", "size": "md" }
//! ```
//!
//! The kind of a component never changes after creation. Edits arrive as a
//! [`ComponentUpdate`], which names the kind it was built for and is refused
//! when that does not match the component it lands on.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_RATING: u8 = 5;
pub const MIN_STAR_COUNT: u8 = 1;
pub const MAX_STAR_COUNT: u8 = 10;
pub const MAX_SPACER_HEIGHT: f64 = 600.0;

/// Tag naming one of the component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Text,
    Button,
    RatingStars,
    Image,
    Gallery,
    Spacer,
    Pill,
    InputField,
    IconText,
    PriceTag,
}

impl ComponentType {
    pub const ALL: [ComponentType; 10] = [
        ComponentType::Text,
        ComponentType::Button,
        ComponentType::RatingStars,
        ComponentType::Image,
        ComponentType::Gallery,
        ComponentType::Spacer,
        ComponentType::Pill,
        ComponentType::InputField,
        ComponentType::IconText,
        ComponentType::PriceTag,
    ];

    /// The JSON tag for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Text => "text",
            ComponentType::Button => "button",
            ComponentType::RatingStars => "ratingStars",
            ComponentType::Image => "image",
            ComponentType::Gallery => "gallery",
            ComponentType::Spacer => "spacer",
            ComponentType::Pill => "pill",
            ComponentType::InputField => "inputField",
            ComponentType::IconText => "iconText",
            ComponentType::PriceTag => "priceTag",
        }
    }

    /// Look up a kind by its JSON tag (exact match)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == tag)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| ModelError::UnknownComponentType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Success,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillTone {
    #[default]
    Default,
    Active,
}

/// A placed component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,

    #[serde(flatten)]
    pub body: ComponentBody,
}

impl Component {
    pub fn component_type(&self) -> ComponentType {
        self.body.component_type()
    }
}

/// Kind-specific fields of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComponentBody {
    Text {
        text: String,
    },
    Button {
        label: String,
        url: String,
        variant: ButtonVariant,
        size: ButtonSize,
    },
    RatingStars {
        rating: u8,
        count: u8,
    },
    Image {
        src: String,
        alt: String,
    },
    Gallery {
        images: Vec<String>,
    },
    Spacer {
        height: f64,
    },
    Pill {
        label: String,
        tone: PillTone,
    },
    InputField {
        label: String,
        placeholder: String,
    },
    IconText {
        icon: String,
        text: String,
    },
    PriceTag {
        amount: String,
        suffix: String,
    },
}

impl ComponentBody {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentBody::Text { .. } => ComponentType::Text,
            ComponentBody::Button { .. } => ComponentType::Button,
            ComponentBody::RatingStars { .. } => ComponentType::RatingStars,
            ComponentBody::Image { .. } => ComponentType::Image,
            ComponentBody::Gallery { .. } => ComponentType::Gallery,
            ComponentBody::Spacer { .. } => ComponentType::Spacer,
            ComponentBody::Pill { .. } => ComponentType::Pill,
            ComponentBody::InputField { .. } => ComponentType::InputField,
            ComponentBody::IconText { .. } => ComponentType::IconText,
            ComponentBody::PriceTag { .. } => ComponentType::PriceTag,
        }
    }

    /// Fields a freshly dropped component of `ty` starts with
    pub fn default_for(ty: ComponentType) -> Self {
        match ty {
            ComponentType::Text => ComponentBody::Text {
                text: String::new(),
            },
            ComponentType::Button => ComponentBody::Button {
                label: String::new(),
                url: String::new(),
                variant: ButtonVariant::Primary,
                size: ButtonSize::Md,
            },
            ComponentType::RatingStars => ComponentBody::RatingStars { rating: 4, count: 5 },
            ComponentType::Image => ComponentBody::Image {
                src: String::new(),
                alt: String::new(),
            },
            ComponentType::Gallery => ComponentBody::Gallery { images: Vec::new() },
            ComponentType::Spacer => ComponentBody::Spacer { height: 24.0 },
            ComponentType::Pill => ComponentBody::Pill {
                label: "Label".to_string(),
                tone: PillTone::Default,
            },
            ComponentType::InputField => ComponentBody::InputField {
                label: "Field".to_string(),
                placeholder: "Select...".to_string(),
            },
            ComponentType::IconText => ComponentBody::IconText {
                icon: "📍".to_string(),
                text: "Los Angeles".to_string(),
            },
            ComponentType::PriceTag => ComponentBody::PriceTag {
                amount: "$49.00".to_string(),
                suffix: "/ night".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPatch {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonPatch {
    pub label: Option<String>,
    pub url: Option<String>,
    pub variant: Option<ButtonVariant>,
    pub size: Option<ButtonSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingStarsPatch {
    pub rating: Option<u8>,
    pub count: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePatch {
    pub src: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryPatch {
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacerPatch {
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillPatch {
    pub label: Option<String>,
    pub tone: Option<PillTone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFieldPatch {
    pub label: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconTextPatch {
    pub icon: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTagPatch {
    pub amount: Option<String>,
    pub suffix: Option<String>,
}

/// A partial edit aimed at one component kind
///
/// JSON form: `{ "type": "button", "patch": { "label": "Book" } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "patch", rename_all = "camelCase")]
pub enum ComponentUpdate {
    Text(TextPatch),
    Button(ButtonPatch),
    RatingStars(RatingStarsPatch),
    Image(ImagePatch),
    Gallery(GalleryPatch),
    Spacer(SpacerPatch),
    Pill(PillPatch),
    InputField(InputFieldPatch),
    IconText(IconTextPatch),
    PriceTag(PriceTagPatch),
}

fn patched<T: Clone>(value: &Option<T>, current: &T) -> T {
    value.clone().unwrap_or_else(|| current.clone())
}

impl ComponentUpdate {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentUpdate::Text(_) => ComponentType::Text,
            ComponentUpdate::Button(_) => ComponentType::Button,
            ComponentUpdate::RatingStars(_) => ComponentType::RatingStars,
            ComponentUpdate::Image(_) => ComponentType::Image,
            ComponentUpdate::Gallery(_) => ComponentType::Gallery,
            ComponentUpdate::Spacer(_) => ComponentType::Spacer,
            ComponentUpdate::Pill(_) => ComponentType::Pill,
            ComponentUpdate::InputField(_) => ComponentType::InputField,
            ComponentUpdate::IconText(_) => ComponentType::IconText,
            ComponentUpdate::PriceTag(_) => ComponentType::PriceTag,
        }
    }

    /// Apply the patch to `body`, or `None` if the kinds differ
    ///
    /// Bounded numeric fields are clamped to their valid ranges.
    pub fn apply_to(&self, body: &ComponentBody) -> Option<ComponentBody> {
        if self.component_type() != body.component_type() {
            return None;
        }

        let next = match (self, body) {
            (ComponentUpdate::Text(p), ComponentBody::Text { text }) => ComponentBody::Text {
                text: patched(&p.text, text),
            },
            (
                ComponentUpdate::Button(p),
                ComponentBody::Button {
                    label,
                    url,
                    variant,
                    size,
                },
            ) => ComponentBody::Button {
                label: patched(&p.label, label),
                url: patched(&p.url, url),
                variant: patched(&p.variant, variant),
                size: patched(&p.size, size),
            },
            (ComponentUpdate::RatingStars(p), ComponentBody::RatingStars { rating, count }) => {
                ComponentBody::RatingStars {
                    rating: patched(&p.rating, rating).min(MAX_RATING),
                    count: patched(&p.count, count).clamp(MIN_STAR_COUNT, MAX_STAR_COUNT),
                }
            }
            (ComponentUpdate::Image(p), ComponentBody::Image { src, alt }) => ComponentBody::Image {
                src: patched(&p.src, src),
                alt: patched(&p.alt, alt),
            },
            (ComponentUpdate::Gallery(p), ComponentBody::Gallery { images }) => {
                ComponentBody::Gallery {
                    images: patched(&p.images, images),
                }
            }
            (ComponentUpdate::Spacer(p), ComponentBody::Spacer { height }) => {
                let height = match p.height {
                    Some(h) if h.is_finite() => h.clamp(0.0, MAX_SPACER_HEIGHT),
                    _ => *height,
                };
                ComponentBody::Spacer { height }
            }
            (ComponentUpdate::Pill(p), ComponentBody::Pill { label, tone }) => ComponentBody::Pill {
                label: patched(&p.label, label),
                tone: patched(&p.tone, tone),
            },
            (ComponentUpdate::InputField(p), ComponentBody::InputField { label, placeholder }) => {
                ComponentBody::InputField {
                    label: patched(&p.label, label),
                    placeholder: patched(&p.placeholder, placeholder),
                }
            }
            (ComponentUpdate::IconText(p), ComponentBody::IconText { icon, text }) => {
                ComponentBody::IconText {
                    icon: patched(&p.icon, icon),
                    text: patched(&p.text, text),
                }
            }
            (ComponentUpdate::PriceTag(p), ComponentBody::PriceTag { amount, suffix }) => {
                ComponentBody::PriceTag {
                    amount: patched(&p.amount, amount),
                    suffix: patched(&p.suffix, suffix),
                }
            }
            // Tags were compared above
            _ => return None,
        };

        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_json_shape() {
        let component = Component {
            id: "k1".to_string(),
            body: ComponentBody::Button {
                label: "Go".to_string(),
                url: "#".to_string(),
                variant: ButtonVariant::Ghost,
                size: ButtonSize::Sm,
            },
        };

        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "k1",
                "type": "button",
                "label": "Go",
                "url": "#",
                "variant": "ghost",
                "size": "sm"
            })
        );
    }

    #[test]
    fn test_type_tags_round_trip_through_from_str() {
        for ty in ComponentType::ALL {
            assert_eq!(ty.as_str().parse::<ComponentType>().unwrap(), ty);
            assert_eq!(ComponentBody::default_for(ty).component_type(), ty);
        }

        assert!("Button".parse::<ComponentType>().is_err());
        assert!(ComponentType::from_tag("rating_stars").is_none());
    }

    #[test]
    fn test_update_rejects_mismatched_kind() {
        let body = ComponentBody::default_for(ComponentType::Text);
        let update = ComponentUpdate::Button(ButtonPatch {
            label: Some("Book".to_string()),
            ..Default::default()
        });

        assert_eq!(update.apply_to(&body), None);
    }

    #[test]
    fn test_update_keeps_unpatched_fields() {
        let body = ComponentBody::Button {
            label: "Go".to_string(),
            url: "#".to_string(),
            variant: ButtonVariant::Success,
            size: ButtonSize::Sm,
        };
        let update = ComponentUpdate::Button(ButtonPatch {
            label: Some("Book".to_string()),
            ..Default::default()
        });

        let next = update.apply_to(&body).unwrap();
        assert_eq!(
            next,
            ComponentBody::Button {
                label: "Book".to_string(),
                url: "#".to_string(),
                variant: ButtonVariant::Success,
                size: ButtonSize::Sm,
            }
        );
    }

    #[test]
    fn test_update_clamps_bounded_fields() {
        let stars = ComponentBody::default_for(ComponentType::RatingStars);
        let update = ComponentUpdate::RatingStars(RatingStarsPatch {
            rating: Some(99),
            count: Some(0),
        });
        assert_eq!(
            update.apply_to(&stars),
            Some(ComponentBody::RatingStars { rating: 5, count: 1 })
        );

        let spacer = ComponentBody::default_for(ComponentType::Spacer);
        let update = ComponentUpdate::Spacer(SpacerPatch {
            height: Some(10_000.0),
        });
        assert_eq!(
            update.apply_to(&spacer),
            Some(ComponentBody::Spacer { height: 600.0 })
        );
    }

    #[test]
    fn test_update_json_form() {
        let update: ComponentUpdate = serde_json::from_str(
            r#"{ "type": "inputField", "patch": { "placeholder": "Where to?" } }"#,
        )
        .unwrap();

        assert_eq!(
            update,
            ComponentUpdate::InputField(InputFieldPatch {
                label: None,
                placeholder: Some("Where to?".to_string()),
            })
        );
    }
}
