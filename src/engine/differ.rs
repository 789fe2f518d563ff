//! Property-level comparison of a matched (component, element) pair.
//!
//! Every sub-comparator is skipped when either side lacks the property, so
//! sparse extraction data never produces a deviation on its own.

use crate::config::{Config, Thresholds};
use crate::types::{
    format_number, DesignComponent, Deviation, ImplementationElement, MatchRecord, Severity,
    StyleValue,
};

use super::color::{design_color_to_rgb, color_distance, parse_css_color, rgb_to_hex, CssColor, Rgb};
use super::severity::{SeverityCategory, SeverityTables};
use super::typography::{
    normalize_font_family, normalize_font_weight, normalize_text, normalize_text_align,
};

const CORNER_PROPERTIES: [&str; 4] = [
    "borderTopLeftRadius",
    "borderTopRightRadius",
    "borderBottomRightRadius",
    "borderBottomLeftRadius",
];

const PADDING_PROPERTIES: [&str; 4] = ["paddingTop", "paddingRight", "paddingBottom", "paddingLeft"];

/// Deviations and in-tolerance matches for one pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDiff {
    pub deviations: Vec<Deviation>,
    pub matches: Vec<MatchRecord>,
}

impl PropertyDiff {
    fn matched(
        &mut self,
        property: &str,
        expected: String,
        actual: String,
        difference: Option<f64>,
    ) {
        self.matches.push(MatchRecord {
            property: property.to_string(),
            expected_value: expected,
            actual_value: actual,
            difference_magnitude: difference,
        });
    }

    fn deviated(
        &mut self,
        property: &str,
        expected: String,
        actual: String,
        difference: Option<f64>,
        severity: Severity,
        message: String,
    ) {
        self.deviations.push(Deviation {
            property: property.to_string(),
            expected_value: expected,
            actual_value: actual,
            difference_magnitude: difference,
            severity,
            message,
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Differencer {
    pub thresholds: Thresholds,
    pub severity: SeverityTables,
}

impl Differencer {
    pub fn new(thresholds: Thresholds, severity: SeverityTables) -> Self {
        Self {
            thresholds,
            severity,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.thresholds, config.severity)
    }

    pub fn diff(&self, component: &DesignComponent, element: &ImplementationElement) -> PropertyDiff {
        let mut out = PropertyDiff::default();
        self.compare_typography(component, element, &mut out);
        self.compare_colors(component, element, &mut out);
        self.compare_spacing(component, element, &mut out);
        self.compare_border_radius(component, element, &mut out);
        self.compare_dimensions(component, element, &mut out);
        out
    }

    fn compare_typography(
        &self,
        component: &DesignComponent,
        element: &ImplementationElement,
        out: &mut PropertyDiff,
    ) {
        let styles = &element.styles;

        if let Some(style) = &component.style {
            if let (Some(expected), Some(actual)) = (
                style.font_family.as_deref().and_then(normalize_font_family),
                styles.font_family.as_deref().and_then(normalize_font_family),
            ) {
                if expected == actual {
                    out.matched("fontFamily", expected, actual, None);
                } else {
                    let message =
                        format!("fontFamily mismatch (expected '{expected}', found '{actual}')");
                    out.deviated("fontFamily", expected, actual, None, Severity::Medium, message);
                }
            }

            if let (Some(expected), Some(actual)) = (
                style.font_size.map(f64::from),
                styles.font_size.as_ref().and_then(StyleValue::as_px),
            ) {
                self.numeric(
                    out,
                    "fontSize",
                    expected,
                    actual,
                    self.thresholds.font_size_difference,
                    SeverityCategory::FontSize,
                );
            }

            if let (Some(expected), Some(actual)) = (
                style.font_weight.as_ref().and_then(normalize_font_weight),
                styles.font_weight.as_ref().and_then(normalize_font_weight),
            ) {
                if expected == actual {
                    out.matched("fontWeight", expected.to_string(), actual.to_string(), None);
                } else {
                    let message =
                        format!("fontWeight mismatch (expected {expected}, found {actual})");
                    out.deviated(
                        "fontWeight",
                        expected.to_string(),
                        actual.to_string(),
                        Some((expected as f64 - actual as f64).abs()),
                        Severity::Low,
                        message,
                    );
                }
            }

            if let (Some(expected), Some(actual)) = (
                style.line_height.as_ref().and_then(StyleValue::as_px),
                styles.line_height.as_ref().and_then(StyleValue::as_px),
            ) {
                self.numeric(
                    out,
                    "lineHeight",
                    expected,
                    actual,
                    self.thresholds.font_size_difference,
                    SeverityCategory::FontSize,
                );
            }

            if let (Some(expected), Some(actual)) = (
                style.letter_spacing.map(f64::from),
                styles.letter_spacing.as_ref().and_then(StyleValue::as_px),
            ) {
                self.numeric(
                    out,
                    "letterSpacing",
                    expected,
                    actual,
                    self.thresholds.font_size_difference,
                    SeverityCategory::FontSize,
                );
            }

            if let (Some(expected), Some(actual)) = (
                style.text_align.as_deref().and_then(normalize_text_align),
                styles.text_align.as_deref().and_then(normalize_text_align),
            ) {
                if expected == actual {
                    out.matched("textAlign", expected.into(), actual.into(), None);
                } else {
                    let message =
                        format!("textAlign mismatch (expected {expected}, found {actual})");
                    out.deviated(
                        "textAlign",
                        expected.into(),
                        actual.into(),
                        None,
                        Severity::Low,
                        message,
                    );
                }
            }
        }

        if component.is_text() {
            if let (Some(expected), Some(actual)) = (
                component.characters.as_deref().and_then(normalize_text),
                element.text.as_deref().and_then(normalize_text),
            ) {
                if expected == actual {
                    out.matched("textContent", expected, actual, None);
                } else {
                    let message =
                        format!("textContent differs (expected '{expected}', found '{actual}')");
                    out.deviated("textContent", expected, actual, None, Severity::Medium, message);
                }
            }
        }
    }

    fn compare_colors(
        &self,
        component: &DesignComponent,
        element: &ImplementationElement,
        out: &mut PropertyDiff,
    ) {
        let (fill_property, fill_actual) = if component.is_text() {
            ("color", element.styles.color.as_deref())
        } else {
            ("backgroundColor", element.styles.background_color.as_deref())
        };
        if let Some(fill) = component.fill_color() {
            self.color(out, fill_property, design_color_to_rgb(fill), fill_actual);
        }
        if let Some(stroke) = component.stroke_color() {
            self.color(
                out,
                "borderColor",
                design_color_to_rgb(stroke),
                element.styles.border_color.as_deref(),
            );
        }
    }

    fn color(&self, out: &mut PropertyDiff, property: &str, expected: Rgb, actual: Option<&str>) {
        let Some(raw) = actual else {
            return;
        };
        let expected_hex = rgb_to_hex(expected);
        match parse_css_color(raw) {
            None => {
                let message = format!(
                    "{property} could not be compared (expected {expected_hex}, found '{raw}')"
                );
                out.deviated(
                    property,
                    expected_hex,
                    raw.to_string(),
                    None,
                    Severity::Low,
                    message,
                );
            }
            Some(CssColor::Transparent) => {}
            Some(CssColor::Rgb(actual)) => {
                let actual_hex = rgb_to_hex(actual);
                let distance = color_distance(expected, actual);
                if distance <= self.thresholds.color_difference {
                    out.matched(property, expected_hex, actual_hex, Some(distance));
                } else {
                    let severity = self.severity.classify(SeverityCategory::Color, distance);
                    let message = format!(
                        "{property} differs by {} (expected {expected_hex}, found {actual_hex})",
                        format_number(distance)
                    );
                    out.deviated(
                        property,
                        expected_hex,
                        actual_hex,
                        Some(distance),
                        severity,
                        message,
                    );
                }
            }
        }
    }

    fn compare_spacing(
        &self,
        component: &DesignComponent,
        element: &ImplementationElement,
        out: &mut PropertyDiff,
    ) {
        let styles = &element.styles;
        let shorthand = styles.padding.as_ref().and_then(expand_box_shorthand);
        let expected = [
            component.padding_top,
            component.padding_right,
            component.padding_bottom,
            component.padding_left,
        ];
        let longhands = [
            &styles.padding_top,
            &styles.padding_right,
            &styles.padding_bottom,
            &styles.padding_left,
        ];

        for (side, property) in PADDING_PROPERTIES.iter().enumerate() {
            let actual = longhands[side]
                .as_ref()
                .and_then(StyleValue::as_px)
                .or(shorthand.map(|sides| sides[side]));
            if let (Some(expected), Some(actual)) = (expected[side], actual) {
                self.numeric(
                    out,
                    property,
                    f64::from(expected),
                    actual,
                    self.thresholds.spacing_difference,
                    SeverityCategory::Spacing,
                );
            }
        }

        if !component.strokes.is_empty() {
            if let (Some(expected), Some(actual)) = (
                component.stroke_weight,
                styles.border_width.as_ref().and_then(StyleValue::as_px),
            ) {
                self.numeric(
                    out,
                    "borderWidth",
                    f64::from(expected),
                    actual,
                    self.thresholds.spacing_difference,
                    SeverityCategory::Spacing,
                );
            }
        }
    }

    fn compare_border_radius(
        &self,
        component: &DesignComponent,
        element: &ImplementationElement,
        out: &mut PropertyDiff,
    ) {
        let Some(expected) = design_corners(component) else {
            return;
        };
        let actual = element_corners(element);

        let uniform_expected = expected.iter().all(|r| *r == expected[0]);
        let uniform_actual = actual
            .iter()
            .all(|r| r.is_some() && *r == actual[0]);
        if uniform_expected && uniform_actual {
            if let Some(actual) = actual[0] {
                self.numeric(
                    out,
                    "borderRadius",
                    expected[0],
                    actual,
                    self.thresholds.spacing_difference,
                    SeverityCategory::Spacing,
                );
            }
            return;
        }

        for (corner, property) in CORNER_PROPERTIES.iter().enumerate() {
            if let Some(actual) = actual[corner] {
                self.numeric(
                    out,
                    property,
                    expected[corner],
                    actual,
                    self.thresholds.spacing_difference,
                    SeverityCategory::Spacing,
                );
            }
        }
    }

    fn compare_dimensions(
        &self,
        component: &DesignComponent,
        element: &ImplementationElement,
        out: &mut PropertyDiff,
    ) {
        let (Some(design), Some(rect)) = (&component.dimensions, &element.bounding_rect) else {
            return;
        };
        for (property, expected, actual) in [
            ("width", design.width, rect.width),
            ("height", design.height, rect.height),
        ] {
            self.numeric(
                out,
                property,
                f64::from(expected),
                f64::from(actual),
                self.thresholds.size_difference,
                SeverityCategory::Size,
            );
        }
    }

    /// Emits a match when `|expected - actual| <= tolerance`, else a classified deviation.
    fn numeric(
        &self,
        out: &mut PropertyDiff,
        property: &str,
        expected: f64,
        actual: f64,
        tolerance: f64,
        category: SeverityCategory,
    ) {
        let difference = (expected - actual).abs();
        let expected_text = format!("{}px", format_number(expected));
        let actual_text = format!("{}px", format_number(actual));
        if difference <= tolerance {
            out.matched(property, expected_text, actual_text, Some(difference));
            return;
        }

        let severity = self.severity.classify(category, difference);
        let message = format!(
            "{property} differs by {}px (expected {expected_text}, found {actual_text})",
            format_number(difference)
        );
        out.deviated(
            property,
            expected_text,
            actual_text,
            Some(difference),
            severity,
            message,
        );
    }
}

/// Expands a CSS 1-4 value box shorthand (`"8px 16px"`) into top/right/bottom/left
/// (or top-left/top-right/bottom-right/bottom-left for radii).
pub fn expand_box_shorthand(value: &StyleValue) -> Option<[f64; 4]> {
    if let StyleValue::Number(n) = value {
        return n.is_finite().then_some([*n; 4]);
    }
    let text = value.as_text();
    // Elliptical radii ("8px / 4px") compare on the horizontal radius.
    let horizontal = text.split('/').next().unwrap_or_default();
    let parts: Vec<f64> = horizontal
        .split_whitespace()
        .map(|part| StyleValue::from(part).as_px())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [a] => Some([*a; 4]),
        [a, b] => Some([*a, *b, *a, *b]),
        [a, b, c] => Some([*a, *b, *c, *b]),
        [a, b, c, d] => Some([*a, *b, *c, *d]),
        _ => None,
    }
}

fn design_corners(component: &DesignComponent) -> Option<[f64; 4]> {
    if let Some(radii) = &component.rectangle_corner_radii {
        if let [a, b, c, d] = radii.as_slice() {
            return Some([*a, *b, *c, *d].map(f64::from));
        }
    }
    component.corner_radius.map(|r| [f64::from(r); 4])
}

fn element_corners(element: &ImplementationElement) -> [Option<f64>; 4] {
    let styles = &element.styles;
    let shorthand = styles.border_radius.as_ref().and_then(expand_box_shorthand);
    let longhands = [
        &styles.border_top_left_radius,
        &styles.border_top_right_radius,
        &styles.border_bottom_right_radius,
        &styles.border_bottom_left_radius,
    ];
    let mut corners = [None; 4];
    for (idx, longhand) in longhands.iter().enumerate() {
        corners[idx] = longhand
            .as_ref()
            .and_then(expand_box_shorthand)
            .map(|v| v[0])
            .or(shorthand.map(|v| v[idx]));
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ComponentType, DesignColor, DesignTextStyle, Dimensions, ElementStyles, Paint,
    };

    fn solid(r: f32, g: f32, b: f32) -> Paint {
        Paint {
            paint_type: "SOLID".into(),
            color: Some(DesignColor { r, g, b, a: 1.0 }),
            opacity: None,
            visible: None,
        }
    }

    fn rect(width: f32, height: f32) -> Option<Dimensions> {
        Some(Dimensions {
            x: 0.0,
            y: 0.0,
            width,
            height,
        })
    }

    fn find<'a>(diff: &'a PropertyDiff, property: &str) -> Option<&'a Deviation> {
        diff.deviations.iter().find(|d| d.property == property)
    }

    #[test]
    fn absent_fields_produce_nothing() {
        let diff = Differencer::default().diff(&DesignComponent::default(), &ImplementationElement::default());
        assert!(diff.deviations.is_empty());
        assert!(diff.matches.is_empty());
    }

    #[test]
    fn dimensions_within_tolerance_match() {
        let component = DesignComponent {
            dimensions: rect(120.0, 40.0),
            ..Default::default()
        };
        let element = ImplementationElement {
            bounding_rect: rect(122.0, 40.0),
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert!(diff.deviations.is_empty());
        assert_eq!(diff.matches.len(), 2);
        assert_eq!(diff.matches[0].difference_magnitude, Some(2.0));
    }

    #[test]
    fn dimension_severity_uses_size_table() {
        let component = DesignComponent {
            dimensions: rect(100.0, 100.0),
            ..Default::default()
        };
        let element = ImplementationElement {
            bounding_rect: rect(119.0, 120.0),
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert_eq!(find(&diff, "width").map(|d| d.severity), Some(Severity::Medium));
        assert_eq!(find(&diff, "height").map(|d| d.severity), Some(Severity::High));
        let width = find(&diff, "width").unwrap();
        assert_eq!(width.expected_value, "100px");
        assert_eq!(width.actual_value, "119px");
        assert!(width.message.contains("differs by 19px"));
    }

    #[test]
    fn typography_mismatches_use_fixed_and_classified_severities() {
        let component = DesignComponent {
            component_type: ComponentType::Text,
            style: Some(DesignTextStyle {
                font_family: Some("Inter".into()),
                font_size: Some(16.0),
                font_weight: Some(StyleValue::Number(700.0)),
                ..Default::default()
            }),
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                font_family: Some("\"Roboto\", sans-serif".into()),
                font_size: Some("22px".into()),
                font_weight: Some("normal".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);

        assert_eq!(find(&diff, "fontFamily").map(|d| d.severity), Some(Severity::Medium));
        assert_eq!(find(&diff, "fontSize").map(|d| d.severity), Some(Severity::High));
        assert_eq!(find(&diff, "fontWeight").map(|d| d.severity), Some(Severity::Low));
    }

    #[test]
    fn letter_spacing_uses_font_size_tolerance() {
        let component = DesignComponent {
            style: Some(DesignTextStyle {
                letter_spacing: Some(0.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let close = ImplementationElement {
            styles: ElementStyles {
                letter_spacing: Some("1.5px".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let far = ImplementationElement {
            styles: ElementStyles {
                letter_spacing: Some("4.5px".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let normal = ImplementationElement {
            styles: ElementStyles {
                letter_spacing: Some("normal".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let differ = Differencer::default();

        let diff = differ.diff(&component, &close);
        assert!(diff.deviations.is_empty());
        assert_eq!(diff.matches[0].property, "letterSpacing");

        let diff = differ.diff(&component, &far);
        assert_eq!(
            find(&diff, "letterSpacing").map(|d| d.severity),
            Some(Severity::Medium)
        );

        let diff = differ.diff(&component, &normal);
        assert!(diff.deviations.is_empty() && diff.matches.is_empty());
    }

    #[test]
    fn font_family_normalization_avoids_false_positives() {
        let component = DesignComponent {
            style: Some(DesignTextStyle {
                font_family: Some("Inter".into()),
                font_size: Some(16.0),
                font_weight: Some("Bold".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                font_family: Some("'inter', Helvetica, Arial".into()),
                font_size: Some("17px".into()),
                font_weight: Some("700".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert!(diff.deviations.is_empty(), "unexpected: {:?}", diff.deviations);
        assert_eq!(diff.matches.len(), 3);
    }

    #[test]
    fn unparsable_color_is_inconclusive_low() {
        let component = DesignComponent {
            fills: vec![solid(0.0, 0.4, 1.0)],
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                background_color: Some("var(--brand)".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        let deviation = find(&diff, "backgroundColor").expect("inconclusive deviation");
        assert_eq!(deviation.severity, Severity::Low);
        assert!(deviation.message.contains("could not be compared"));
        assert_eq!(deviation.difference_magnitude, None);
    }

    #[test]
    fn color_distance_is_classified() {
        let component = DesignComponent {
            fills: vec![solid(0.0, 0.0, 0.0)],
            strokes: vec![solid(1.0, 1.0, 1.0)],
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                background_color: Some("rgb(30, 0, 0)".into()),
                border_color: Some("#fafafa".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert_eq!(
            find(&diff, "backgroundColor").map(|d| d.severity),
            Some(Severity::Medium)
        );
        assert!(find(&diff, "borderColor").is_none());
        assert!(diff.matches.iter().any(|m| m.property == "borderColor"));
    }

    #[test]
    fn transparent_background_is_skipped() {
        let component = DesignComponent {
            fills: vec![solid(0.0, 0.0, 0.0)],
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                background_color: Some("rgba(0, 0, 0, 0)".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert!(diff.deviations.is_empty() && diff.matches.is_empty());
    }

    #[test]
    fn padding_sides_compare_independently_with_shorthand_fallback() {
        let component = DesignComponent {
            padding_top: Some(8.0),
            padding_right: Some(16.0),
            padding_bottom: Some(8.0),
            padding_left: Some(16.0),
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                padding: Some("8px 16px".into()),
                padding_left: Some("4px".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert_eq!(diff.matches.len(), 3);
        let left = find(&diff, "paddingLeft").expect("left deviates");
        assert_eq!(left.severity, Severity::High);
        assert_eq!(left.difference_magnitude, Some(12.0));
    }

    #[test]
    fn uniform_radius_compares_once() {
        let component = DesignComponent {
            corner_radius: Some(8.0),
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                border_radius: Some("8px".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert_eq!(diff.matches.len(), 1);
        assert_eq!(diff.matches[0].property, "borderRadius");
    }

    #[test]
    fn mixed_radii_compare_per_corner() {
        let component = DesignComponent {
            rectangle_corner_radii: Some(vec![8.0, 8.0, 0.0, 0.0]),
            ..Default::default()
        };
        let element = ImplementationElement {
            styles: ElementStyles {
                border_radius: Some("8px 8px 12px 0px".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let diff = Differencer::default().diff(&component, &element);
        assert_eq!(diff.matches.len(), 3);
        let corner = find(&diff, "borderBottomRightRadius").expect("corner deviation");
        assert_eq!(corner.severity, Severity::High);
    }

    #[test]
    fn text_content_compares_normalized_characters() {
        let component = DesignComponent {
            component_type: ComponentType::Text,
            characters: Some("Sign up".into()),
            ..Default::default()
        };
        let same = ImplementationElement {
            text: Some("  sign UP ".into()),
            ..Default::default()
        };
        let other = ImplementationElement {
            text: Some("Register".into()),
            ..Default::default()
        };
        let differ = Differencer::default();
        assert!(differ.diff(&component, &same).deviations.is_empty());
        let deviation = differ.diff(&component, &other).deviations.remove(0);
        assert_eq!(deviation.property, "textContent");
        assert_eq!(deviation.severity, Severity::Medium);
    }

    #[test]
    fn expand_box_shorthand_follows_css_rules() {
        assert_eq!(expand_box_shorthand(&"4px".into()), Some([4.0; 4]));
        assert_eq!(
            expand_box_shorthand(&"1px 2px 3px".into()),
            Some([1.0, 2.0, 3.0, 2.0])
        );
        assert_eq!(
            expand_box_shorthand(&"10px 5px / 2px".into()),
            Some([10.0, 5.0, 10.0, 5.0])
        );
        assert_eq!(expand_box_shorthand(&"auto".into()), None);
        assert_eq!(expand_box_shorthand(&StyleValue::Number(6.0)), Some([6.0; 4]));
    }
}
