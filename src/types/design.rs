//! Design-tool component types.
//!
//! These types describe the normalized node list produced by the design
//! extraction collaborator. They are read-only inputs to the comparison engine.

use serde::{Deserialize, Serialize};

use super::core::{Dimensions, StyleValue};

/// Metadata and components of an extracted design file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub extracted_at: Option<String>,
    #[serde(default)]
    pub components: Vec<DesignComponent>,
}

/// Node type reported by the design tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Text,
    Frame,
    Group,
    Rectangle,
    Ellipse,
    Vector,
    Instance,
    Component,
    /// Any type the engine does not special-case (kept verbatim)
    Other(String),
}

impl ComponentType {
    pub fn as_str(&self) -> &str {
        match self {
            ComponentType::Text => "TEXT",
            ComponentType::Frame => "FRAME",
            ComponentType::Group => "GROUP",
            ComponentType::Rectangle => "RECTANGLE",
            ComponentType::Ellipse => "ELLIPSE",
            ComponentType::Vector => "VECTOR",
            ComponentType::Instance => "INSTANCE",
            ComponentType::Component => "COMPONENT",
            ComponentType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for ComponentType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "TEXT" => ComponentType::Text,
            "FRAME" => ComponentType::Frame,
            "GROUP" => ComponentType::Group,
            "RECTANGLE" => ComponentType::Rectangle,
            "ELLIPSE" => ComponentType::Ellipse,
            "VECTOR" => ComponentType::Vector,
            "INSTANCE" => ComponentType::Instance,
            "COMPONENT" => ComponentType::Component,
            _ => ComponentType::Other(value),
        }
    }
}

impl From<ComponentType> for String {
    fn from(value: ComponentType) -> Self {
        value.as_str().to_string()
    }
}

impl Default for ComponentType {
    fn default() -> Self {
        ComponentType::Other(String::from("UNKNOWN"))
    }
}

/// A color in design-tool channel space (0.0 - 1.0).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DesignColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

/// A fill or stroke paint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub paint_type: String,
    pub color: Option<DesignColor>,
    pub opacity: Option<f32>,
    pub visible: Option<bool>,
}

impl Paint {
    /// Solid, visible, non-transparent paints are the only ones compared.
    pub fn solid_color(&self) -> Option<DesignColor> {
        if !self.paint_type.eq_ignore_ascii_case("SOLID") || self.visible == Some(false) {
            return None;
        }
        let color = self.color?;
        let alpha = color.a * self.opacity.unwrap_or(1.0);
        (alpha > 0.0).then_some(color)
    }
}

/// Typography properties of a text node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<StyleValue>,
    pub line_height: Option<StyleValue>,
    pub letter_spacing: Option<f32>,
    pub text_align: Option<String>,
}

/// A node from the design specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignComponent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub component_type: ComponentType,
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f32>,
    pub style: Option<DesignTextStyle>,
    pub padding_top: Option<f32>,
    pub padding_right: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub padding_left: Option<f32>,
    pub corner_radius: Option<f32>,
    pub rectangle_corner_radii: Option<Vec<f32>>,
    /// Text content for TEXT nodes
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DesignComponent>,
}

impl DesignComponent {
    pub fn fill_color(&self) -> Option<DesignColor> {
        self.fills.iter().find_map(Paint::solid_color)
    }

    pub fn stroke_color(&self) -> Option<DesignColor> {
        self.strokes.iter().find_map(Paint::solid_color)
    }

    pub fn is_text(&self) -> bool {
        self.component_type == ComponentType::Text
    }
}
