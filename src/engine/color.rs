//! Color parsing and distance helpers.

use palette::Srgb;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::types::DesignColor;

/// An 8-bit sRGB triple.
pub type Rgb = Srgb<u8>;

/// Largest possible Euclidean distance between two RGB colors.
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// Result of parsing a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssColor {
    Rgb(Rgb),
    /// Fully transparent; treated as "no color"
    Transparent,
}

fn rgb_function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^rgba?\(\s*([^()]*?)\s*\)$").expect("rgb() pattern is valid")
    })
}

/// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` and a few keywords.
///
/// Returns `None` when the input cannot be interpreted as a color.
pub fn parse_css_color(input: &str) -> Option<CssColor> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "transparent" => return Some(CssColor::Transparent),
        "white" => return Some(CssColor::Rgb(Rgb::new(255, 255, 255))),
        "black" => return Some(CssColor::Rgb(Rgb::new(0, 0, 0))),
        _ => {}
    }

    if trimmed.starts_with('#') {
        return parse_hex_with_alpha(trimmed);
    }

    let captures = rgb_function_regex().captures(trimmed)?;
    let parts: Vec<&str> = captures[1]
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let mut channels = [0u8; 3];
    for (slot, raw) in channels.iter_mut().zip(&parts[..3]) {
        *slot = parse_channel(raw)?;
    }
    if let Some(alpha) = parts.get(3) {
        if parse_alpha(alpha)? <= 0.0 {
            return Some(CssColor::Transparent);
        }
    }
    Some(CssColor::Rgb(Rgb::new(channels[0], channels[1], channels[2])))
}

fn parse_hex_with_alpha(input: &str) -> Option<CssColor> {
    let digits = input.trim_start_matches('#');
    if !digits.is_ascii() {
        return None;
    }
    if digits.len() == 8 {
        let rgb = hex_to_rgb(&digits[..6])?;
        let alpha = u8::from_str_radix(&digits[6..], 16).ok()?;
        return Some(if alpha == 0 {
            CssColor::Transparent
        } else {
            CssColor::Rgb(rgb)
        });
    }
    hex_to_rgb(digits).map(CssColor::Rgb)
}

fn parse_channel(raw: &str) -> Option<u8> {
    let value = if let Some(pct) = raw.strip_suffix('%') {
        pct.parse::<f64>().ok()? * 255.0 / 100.0
    } else {
        raw.parse::<f64>().ok()?
    };
    value
        .is_finite()
        .then(|| value.round().clamp(0.0, 255.0) as u8)
}

fn parse_alpha(raw: &str) -> Option<f64> {
    let value = if let Some(pct) = raw.strip_suffix('%') {
        pct.parse::<f64>().ok()? / 100.0
    } else {
        raw.parse::<f64>().ok()?
    };
    value.is_finite().then_some(value)
}

/// Parses a 3- or 6-digit hex color, with or without the leading `#`.
pub fn hex_to_rgb(input: &str) -> Option<Rgb> {
    let digits = input.trim().trim_start_matches('#');
    if !(digits.len() == 3 || digits.len() == 6) || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return None;
    }
    Rgb::from_str(digits).ok()
}

/// Formats a color as lowercase `#rrggbb`.
pub fn rgb_to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Converts a design-tool color (0.0 - 1.0 channels) to 8-bit RGB.
pub fn design_color_to_rgb(color: DesignColor) -> Rgb {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(channel(color.r), channel(color.g), channel(color.b))
}

/// Euclidean distance in RGB space (0 - ~441.67).
pub fn color_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.red as f64 - b.red as f64;
    let dg = a.green as f64 - b.green as f64;
    let db = a.blue as f64 - b.blue as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}
