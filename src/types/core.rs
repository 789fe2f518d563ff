//! Core types shared by the design and implementation models.
//!
//! - [`Dimensions`] - Element positioning and size
//! - [`StyleValue`] - A CSS or design-tool value that may be a number or text

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rectangle bounds for a node or element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl Dimensions {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn diagonal(&self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt()
    }
}

/// A style value as emitted by an extractor.
///
/// Computed CSS arrives as strings (`"16px"`, `"bold"`), design tools usually
/// emit bare numbers. Both forms are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    /// Pixel value, accepting unitless or `px`-suffixed numbers.
    ///
    /// Keywords such as `normal` or `auto` yield `None`.
    pub fn as_px(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => n.is_finite().then_some(*n),
            StyleValue::Text(text) => parse_px(text),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            StyleValue::Number(n) => format_number(*n),
            StyleValue::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

/// Parses `"12"`, `"12px"` or `"12.5 px"` into a pixel count.
pub fn parse_px(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let number = trimmed
        .strip_suffix("px")
        .map(str::trim_end)
        .unwrap_or(trimmed);
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Formats a number without a trailing `.0` for whole values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
