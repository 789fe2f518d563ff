use super::sanitize::truncate_string;
use crate::types::{ComparisonReport, Deviation, Severity};

const PRIORITY_EXISTENCE: u8 = 0;
const PRIORITY_COLOR: u8 = 1;
const PRIORITY_TYPOGRAPHY: u8 = 2;
const PRIORITY_DIMENSIONS: u8 = 3;
const PRIORITY_SPACING: u8 = 4;
const PRIORITY_OTHER: u8 = 5;

#[derive(Debug, Clone)]
struct RankedIssue {
    severity: Severity,
    priority_rank: u8,
    message: String,
}

impl RankedIssue {
    fn from_deviation(component_name: &str, deviation: &Deviation, max_length: usize) -> Self {
        let message = if component_name.is_empty() {
            deviation.message.clone()
        } else {
            format!("{}: {}", component_name, deviation.message)
        };
        let message = truncate_string(message, max_length);
        Self {
            severity: deviation.severity,
            priority_rank: property_priority(&deviation.property),
            message,
        }
    }
}

fn property_priority(property: &str) -> u8 {
    match property {
        "existence" => PRIORITY_EXISTENCE,
        "color" | "backgroundColor" | "borderColor" => PRIORITY_COLOR,
        "fontFamily" | "fontSize" | "fontWeight" | "lineHeight" | "letterSpacing" | "textAlign"
        | "textContent" => PRIORITY_TYPOGRAPHY,
        "width" | "height" => PRIORITY_DIMENSIONS,
        p if p.starts_with("padding") || p.starts_with("border") => PRIORITY_SPACING,
        _ => PRIORITY_OTHER,
    }
}

/// The `max_issues` most important deviations of a report as display lines.
///
/// Ordered by severity (high first), then category, then message text. Each
/// line is bounded to `max_length` chars.
pub fn top_issues(report: &ComparisonReport, max_issues: usize, max_length: usize) -> Vec<String> {
    let mut issues: Vec<RankedIssue> = report
        .comparisons
        .iter()
        .flat_map(|result| {
            result
                .deviations
                .iter()
                .map(|d| RankedIssue::from_deviation(&result.component_name, d, max_length))
        })
        .collect();

    issues.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.priority_rank.cmp(&b.priority_rank))
            .then_with(|| a.message.cmp(&b.message))
    });
    issues
        .into_iter()
        .take(max_issues)
        .map(|i| i.message)
        .collect()
}
