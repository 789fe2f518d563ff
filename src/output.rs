use crate::error::ErrorPayload;
use crate::types::ComparisonReport;
use serde::{Deserialize, Serialize};

/// Schema version for output payloads.
pub const DQA_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum DqaOutput {
    Compare(CompareOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareOutput {
    pub version: String,
    #[serde(flatten)]
    pub report: ComparisonReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_issues: Vec<String>,
}

impl CompareOutput {
    pub fn new(report: ComparisonReport, top_issues: Vec<String>) -> Self {
        Self {
            version: DQA_OUTPUT_VERSION.to_string(),
            report,
            top_issues,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

impl ErrorOutput {
    pub fn new(error: ErrorPayload) -> Self {
        Self {
            version: DQA_OUTPUT_VERSION.to_string(),
            message: Some(error.message.clone()),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DqaError;
    use crate::types::{
        FigmaMetadata, ProcessingStats, ReportMetadata, Summary, WebMetadata,
    };
    use chrono::{TimeZone, Utc};

    fn empty_report() -> ComparisonReport {
        ComparisonReport {
            metadata: ReportMetadata {
                figma: FigmaMetadata::default(),
                web: WebMetadata {
                    url: Some("https://example.com".into()),
                    ..WebMetadata::default()
                },
                compared_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
                processing_stats: ProcessingStats::default(),
            },
            comparisons: Vec::new(),
            summary: Summary::default(),
        }
    }

    #[test]
    fn compare_output_flattens_report() {
        let output = DqaOutput::Compare(CompareOutput::new(empty_report(), Vec::new()));
        let value = serde_json::to_value(&output).expect("serialize compare output");

        assert_eq!(value["mode"], "compare");
        assert_eq!(value["version"], DQA_OUTPUT_VERSION);
        assert_eq!(value["metadata"]["web"]["url"], "https://example.com");
        assert_eq!(value["metadata"]["comparedAt"], "2024-01-02T03:04:05Z");
        assert_eq!(value["summary"]["totalComponents"], 0);
        assert!(value["comparisons"].as_array().is_some_and(Vec::is_empty));
        assert!(value.get("topIssues").is_none());
    }

    #[test]
    fn error_output_serializes_payload() {
        let payload = DqaError::Config("bad chunk size".into()).to_payload();
        let output = DqaOutput::Error(ErrorOutput::new(payload));
        let json = serde_json::to_string(&output).expect("serialize error output");
        assert!(json.contains("\"mode\":\"error\""));
        assert!(json.contains("\"category\":\"config\""));
        assert!(json.contains("bad chunk size"));
    }

    #[test]
    fn compare_output_round_trips_through_json() {
        let output = DqaOutput::Compare(CompareOutput::new(
            empty_report(),
            vec!["Card: width differs".into()],
        ));
        let json = serde_json::to_string(&output).expect("serialize");
        let parsed: DqaOutput = serde_json::from_str(&json).expect("deserialize");
        match parsed {
            DqaOutput::Compare(out) => {
                assert_eq!(out.report, empty_report());
                assert_eq!(out.top_issues, vec!["Card: width differs"]);
            }
            other => panic!("unexpected output {other:?}"),
        }
    }
}
