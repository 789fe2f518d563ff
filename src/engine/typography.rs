//! Normalization tables for fonts and text.

use crate::types::StyleValue;

/// Lowercased primary family: quotes stripped, first comma segment only.
pub fn normalize_font_family(family: &str) -> Option<String> {
    let first = family.split(',').next()?;
    let cleaned = first
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_lowercase();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Numeric weight (100 - 900) from a number or a named weight.
pub fn normalize_font_weight(weight: &StyleValue) -> Option<u16> {
    match weight {
        StyleValue::Number(n) if n.is_finite() && *n > 0.0 => Some(n.round() as u16),
        StyleValue::Number(_) => None,
        StyleValue::Text(text) => font_weight_from_name(text),
    }
}

fn font_weight_from_name(name: &str) -> Option<u16> {
    let lower: String = name
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect();
    if let Ok(num) = lower.parse::<f64>() {
        return (num.is_finite() && num > 0.0).then(|| num.round() as u16);
    }
    match lower.as_str() {
        "thin" | "hairline" => Some(100),
        "extralight" | "ultralight" => Some(200),
        "light" => Some(300),
        "normal" | "regular" | "book" => Some(400),
        "medium" => Some(500),
        "semibold" | "demibold" => Some(600),
        "bold" => Some(700),
        "extrabold" | "ultrabold" => Some(800),
        "black" | "heavy" => Some(900),
        _ => None,
    }
}

/// Maps design-tool and CSS alignment keywords onto a shared vocabulary.
pub fn normalize_text_align(align: &str) -> Option<&'static str> {
    match align.trim().to_ascii_lowercase().as_str() {
        "left" | "start" => Some("left"),
        "right" | "end" => Some("right"),
        "center" => Some("center"),
        "justified" | "justify" => Some("justify"),
        _ => None,
    }
}

/// Lowercased text with punctuation dropped and whitespace collapsed.
pub fn normalize_text(input: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(input.len());
    for ch in input.to_lowercase().chars() {
        if ch.is_alphanumeric() {
            cleaned.push(ch);
        } else if ch.is_whitespace() {
            cleaned.push(' ');
        }
    }

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_family_takes_first_unquoted_segment() {
        assert_eq!(
            normalize_font_family("\"Inter\", -apple-system, sans-serif").as_deref(),
            Some("inter")
        );
        assert_eq!(
            normalize_font_family("'SF Pro Display'").as_deref(),
            Some("sf pro display")
        );
        assert_eq!(normalize_font_family("  ,serif"), None);
    }

    #[test]
    fn font_weight_accepts_names_and_numbers() {
        assert_eq!(normalize_font_weight(&StyleValue::from("bold")), Some(700));
        assert_eq!(normalize_font_weight(&StyleValue::from("Semi Bold")), Some(600));
        assert_eq!(normalize_font_weight(&StyleValue::from("extra-bold")), Some(800));
        assert_eq!(normalize_font_weight(&StyleValue::from("thin")), Some(100));
        assert_eq!(normalize_font_weight(&StyleValue::from("black")), Some(900));
        assert_eq!(normalize_font_weight(&StyleValue::from("400")), Some(400));
        assert_eq!(normalize_font_weight(&StyleValue::Number(600.0)), Some(600));
        assert_eq!(normalize_font_weight(&StyleValue::from("bolder")), None);
    }

    #[test]
    fn text_align_maps_design_and_css_keywords() {
        assert_eq!(normalize_text_align("LEFT"), Some("left"));
        assert_eq!(normalize_text_align("start"), Some("left"));
        assert_eq!(normalize_text_align("JUSTIFIED"), Some("justify"));
        assert_eq!(normalize_text_align("inherit"), None);
    }

    #[test]
    fn normalize_text_collapses_whitespace_and_punctuation() {
        assert_eq!(
            normalize_text("  Sign   up, now! ").as_deref(),
            Some("sign up now")
        );
        assert_eq!(normalize_text("..."), None);
    }
}
