//! Final report assembly.

use chrono::{DateTime, Utc};

use crate::types::{
    ComparisonReport, ComparisonResult, FigmaMetadata, ReportMetadata, WebMetadata,
};

use super::aggregate::AggregateOutcome;
use super::sanitize::truncate_string;

/// Source of the `comparedAt` timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant; used for reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler {
    pub max_string_length: usize,
}

impl ResultAssembler {
    pub fn new(max_string_length: usize) -> Self {
        Self { max_string_length }
    }

    /// Wraps an aggregate outcome and source metadata into a report.
    ///
    /// Every free-form string is bounded again so that messages built from
    /// long names stay within the configured limit.
    pub fn assemble(
        &self,
        outcome: AggregateOutcome,
        figma: FigmaMetadata,
        web: WebMetadata,
        clock: &dyn Clock,
    ) -> ComparisonReport {
        let AggregateOutcome {
            comparisons,
            summary,
            stats,
        } = outcome;

        let figma = FigmaMetadata {
            file_id: self.bound_opt(figma.file_id),
            file_name: self.bound_opt(figma.file_name),
            extracted_at: self.bound_opt(figma.extracted_at),
            total_components: figma.total_components,
        };
        let web = WebMetadata {
            url: self.bound_opt(web.url),
            extracted_at: self.bound_opt(web.extracted_at),
            total_elements: web.total_elements,
        };

        ComparisonReport {
            metadata: ReportMetadata {
                figma,
                web,
                compared_at: clock.now(),
                processing_stats: stats,
            },
            comparisons: comparisons
                .into_iter()
                .map(|result| self.bound_result(result))
                .collect(),
            summary,
        }
    }

    fn bound(&self, value: String) -> String {
        truncate_string(value, self.max_string_length)
    }

    fn bound_opt(&self, value: Option<String>) -> Option<String> {
        value.map(|v| self.bound(v))
    }

    fn bound_result(&self, mut result: ComparisonResult) -> ComparisonResult {
        result.component_id = self.bound(result.component_id);
        result.component_name = self.bound(result.component_name);
        result.component_type = self.bound(result.component_type);
        result.matched_selector = self.bound_opt(result.matched_selector);
        for deviation in &mut result.deviations {
            deviation.expected_value = self.bound(std::mem::take(&mut deviation.expected_value));
            deviation.actual_value = self.bound(std::mem::take(&mut deviation.actual_value));
            deviation.message = self.bound(std::mem::take(&mut deviation.message));
        }
        for record in &mut result.matches {
            record.expected_value = self.bound(std::mem::take(&mut record.expected_value));
            record.actual_value = self.bound(std::mem::take(&mut record.actual_value));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sanitize::ELLIPSIS;
    use crate::types::{ComparisonStatus, Deviation, ProcessingStats, Severity, Summary};
    use chrono::TimeZone;

    fn frozen() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn uses_injected_clock_and_keeps_stats() {
        let outcome = AggregateOutcome {
            stats: ProcessingStats {
                chunks_processed: 2,
                components_processed: 12,
                components_failed: 1,
                original_component_count: 12,
                original_element_count: 40,
            },
            ..AggregateOutcome::default()
        };
        let report = ResultAssembler::new(1000).assemble(
            outcome,
            FigmaMetadata {
                file_id: Some("abc".into()),
                total_components: 12,
                ..FigmaMetadata::default()
            },
            WebMetadata::default(),
            &frozen(),
        );

        assert_eq!(report.metadata.compared_at, frozen().0);
        assert_eq!(report.metadata.processing_stats.chunks_processed, 2);
        assert_eq!(report.metadata.figma.file_id.as_deref(), Some("abc"));
        assert_eq!(report.summary, Summary::default());
    }

    #[test]
    fn output_strings_are_bounded() {
        let long = "n".repeat(50);
        let outcome = AggregateOutcome {
            comparisons: vec![ComparisonResult {
                component_id: "1".into(),
                component_name: long.clone(),
                component_type: "TEXT".into(),
                matched_selector: None,
                status: ComparisonStatus::NoMatch,
                deviations: vec![Deviation {
                    property: "existence".into(),
                    expected_value: "exists".into(),
                    actual_value: "not found".into(),
                    difference_magnitude: None,
                    severity: Severity::High,
                    message: format!("No implementation element found for '{long}'"),
                }],
                matches: Vec::new(),
                match_score: None,
            }],
            ..AggregateOutcome::default()
        };
        let report = ResultAssembler::new(10).assemble(
            outcome,
            FigmaMetadata::default(),
            WebMetadata {
                url: Some(format!("https://example.com/{long}")),
                ..WebMetadata::default()
            },
            &frozen(),
        );

        let result = &report.comparisons[0];
        assert_eq!(result.component_name, format!("nnnnnnnnnn{ELLIPSIS}"));
        assert!(result.deviations[0].message.chars().count() <= 10 + ELLIPSIS.len());
        assert_eq!(result.deviations[0].expected_value, "exists");
        assert!(report.metadata.web.url.as_deref().is_some_and(|u| u.ends_with(ELLIPSIS)));
    }
}
