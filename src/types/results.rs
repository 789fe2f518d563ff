//! Comparison result types.
//!
//! These types make up the payload handed to report writers:
//! - Per-component results with deviations and matches
//! - Run summary counters
//! - Source and processing metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DqaError;

/// Ordinal visual impact of a deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DqaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(DqaError::Config(format!("Unknown severity: {}", other))),
        }
    }
}

/// Outcome of comparing one design component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    Matches,
    HasDeviations,
    NoMatch,
}

/// A property-level mismatch between a component and its matched element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deviation {
    pub property: String,
    pub expected_value: String,
    pub actual_value: String,
    /// Numeric distance for measurable properties; absent for categorical ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference_magnitude: Option<f64>,
    pub severity: Severity,
    pub message: String,
}

/// A property that was compared and found within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub property: String,
    pub expected_value: String,
    pub actual_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference_magnitude: Option<f64>,
}

/// Result of comparing one design component against the implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub component_id: String,
    pub component_name: String,
    pub component_type: String,
    pub matched_selector: Option<String>,
    pub status: ComparisonStatus,
    #[serde(default)]
    pub deviations: Vec<Deviation>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    pub match_score: Option<f64>,
}

/// Per-severity deviation counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

/// Run-level counters accumulated by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_components: usize,
    pub total_deviations: usize,
    pub total_matches: usize,
    #[serde(default)]
    pub unmatched_components: usize,
    pub severity_counts: SeverityCounts,
}

impl Summary {
    pub fn record(&mut self, result: &ComparisonResult) {
        self.total_components += 1;
        self.total_deviations += result.deviations.len();
        self.total_matches += result.matches.len();
        if result.status == ComparisonStatus::NoMatch {
            self.unmatched_components += 1;
        }
        for deviation in &result.deviations {
            self.severity_counts.add(deviation.severity);
        }
    }

    /// Highest severity seen in the run, if any deviation was recorded.
    pub fn max_severity(&self) -> Option<Severity> {
        if self.severity_counts.high > 0 {
            Some(Severity::High)
        } else if self.severity_counts.medium > 0 {
            Some(Severity::Medium)
        } else if self.severity_counts.low > 0 {
            Some(Severity::Low)
        } else {
            None
        }
    }
}

/// Source metadata for the design input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaMetadata {
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub extracted_at: Option<String>,
    pub total_components: usize,
}

/// Source metadata for the implementation input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebMetadata {
    pub url: Option<String>,
    pub extracted_at: Option<String>,
    pub total_elements: usize,
}

/// Bookkeeping about how the run was processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub chunks_processed: usize,
    pub components_processed: usize,
    #[serde(default)]
    pub components_failed: usize,
    pub original_component_count: usize,
    pub original_element_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub figma: FigmaMetadata,
    pub web: WebMetadata,
    pub compared_at: DateTime<Utc>,
    pub processing_stats: ProcessingStats,
}

/// Final payload of a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub metadata: ReportMetadata,
    pub comparisons: Vec<ComparisonResult>,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(status: ComparisonStatus, severities: &[Severity]) -> ComparisonResult {
        ComparisonResult {
            component_id: "1".into(),
            component_name: "Button".into(),
            component_type: "RECTANGLE".into(),
            matched_selector: None,
            status,
            deviations: severities
                .iter()
                .map(|s| Deviation {
                    property: "width".into(),
                    expected_value: "10px".into(),
                    actual_value: "40px".into(),
                    difference_magnitude: Some(30.0),
                    severity: *s,
                    message: "width differs".into(),
                })
                .collect(),
            matches: Vec::new(),
            match_score: None,
        }
    }

    #[test]
    fn summary_counts_deviations_by_severity() {
        let mut summary = Summary::default();
        summary.record(&result_with(
            ComparisonStatus::HasDeviations,
            &[Severity::High, Severity::Low, Severity::Low],
        ));
        summary.record(&result_with(ComparisonStatus::NoMatch, &[Severity::High]));

        assert_eq!(summary.total_components, 2);
        assert_eq!(summary.total_deviations, 4);
        assert_eq!(summary.unmatched_components, 1);
        assert_eq!(summary.severity_counts.high, 2);
        assert_eq!(summary.severity_counts.low, 2);
        assert_eq!(summary.max_severity(), Some(Severity::High));
    }

    #[test]
    fn severity_orders_and_parses() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!("MEDIUM".parse::<Severity>().ok(), Some(Severity::Medium));
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ComparisonStatus::HasDeviations).expect("serialize");
        assert_eq!(json, "\"has_deviations\"");
        let json = serde_json::to_string(&ComparisonStatus::NoMatch).expect("serialize");
        assert_eq!(json, "\"no_match\"");
    }
}
