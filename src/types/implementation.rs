//! Rendered-page element types.
//!
//! These types represent the DOM/style snapshot produced by the web extraction
//! collaborator for a live page.

use serde::{Deserialize, Serialize};

use super::core::{Dimensions, StyleValue};

/// Metadata and elements of an extracted page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebDocument {
    pub url: Option<String>,
    pub extracted_at: Option<String>,
    #[serde(default)]
    pub elements: Vec<ImplementationElement>,
}

/// A rendered DOM element with its computed styles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationElement {
    /// CSS selector uniquely locating the element
    pub selector: Option<String>,
    /// HTML tag name (e.g., "div", "span", "button")
    pub tag_name: Option<String>,
    /// Visible text content
    pub text: Option<String>,
    /// Position and size on screen
    pub bounding_rect: Option<Dimensions>,
    /// CSS computed styles
    #[serde(default)]
    pub styles: ElementStyles,
}

impl ImplementationElement {
    /// Label used in results: the selector, falling back to the tag name.
    pub fn label(&self) -> Option<String> {
        self.selector
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.tag_name.as_deref())
            .map(str::to_string)
    }

    pub fn tag(&self) -> Option<String> {
        self.tag_name
            .as_deref()
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
    }
}

/// Computed CSS styles for an element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyles {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<StyleValue>,
    pub font_weight: Option<StyleValue>,
    pub line_height: Option<StyleValue>,
    pub letter_spacing: Option<StyleValue>,
    pub text_align: Option<String>,
    pub border_radius: Option<StyleValue>,
    pub border_top_left_radius: Option<StyleValue>,
    pub border_top_right_radius: Option<StyleValue>,
    pub border_bottom_right_radius: Option<StyleValue>,
    pub border_bottom_left_radius: Option<StyleValue>,
    pub padding: Option<StyleValue>,
    pub padding_top: Option<StyleValue>,
    pub padding_right: Option<StyleValue>,
    pub padding_bottom: Option<StyleValue>,
    pub padding_left: Option<StyleValue>,
    pub border_color: Option<String>,
    pub border_width: Option<StyleValue>,
}
