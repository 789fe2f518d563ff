//! Chunked orchestration of matching and diffing.

use futures::future::join_all;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{DqaError, Result};
use crate::types::{
    ComparisonResult, ComparisonStatus, DesignComponent, Deviation, ImplementationElement,
    ProcessingStats, Severity, Summary,
};

use super::differ::Differencer;
use super::matcher::Matcher;
use super::sanitize::chunk;

/// Comparisons in input order plus the counters gathered while producing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateOutcome {
    pub comparisons: Vec<ComparisonResult>,
    pub summary: Summary,
    pub stats: ProcessingStats,
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    matcher: Matcher,
    differ: Differencer,
    chunk_size: usize,
}

impl Aggregator {
    pub fn new(matcher: Matcher, differ: Differencer, chunk_size: usize) -> Self {
        Self {
            matcher,
            differ,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Matcher::from_config(&config.matching),
            Differencer::from_config(config),
            config.max_components_per_chunk,
        )
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Compares every raw design component against the shared element list.
    ///
    /// Chunks run one after another; the components of a chunk are compared
    /// concurrently and appended once the whole chunk resolves. A component
    /// that fails to decode or compare is logged and left out of the output.
    pub async fn run(
        &self,
        components: &[Value],
        elements: &[ImplementationElement],
    ) -> AggregateOutcome {
        let mut outcome = AggregateOutcome::default();

        for (chunk_index, batch) in chunk(components, self.chunk_size).into_iter().enumerate() {
            debug!(chunk = chunk_index, size = batch.len(), "comparing chunk");
            let results = join_all(
                batch
                    .iter()
                    .map(|component| self.compare_component(component, elements)),
            )
            .await;

            for result in results {
                outcome.stats.components_processed += 1;
                match result {
                    Ok(comparison) => {
                        outcome.summary.record(&comparison);
                        outcome.comparisons.push(comparison);
                    }
                    Err(err) => {
                        outcome.stats.components_failed += 1;
                        warn!(chunk = chunk_index, error = %err, "dropping component");
                    }
                }
            }
            outcome.stats.chunks_processed += 1;
        }

        outcome
    }

    async fn compare_component(
        &self,
        raw: &Value,
        elements: &[ImplementationElement],
    ) -> Result<ComparisonResult> {
        let component = DesignComponent::deserialize(raw)
            .map_err(|err| DqaError::component(raw_component_id(raw), err.to_string()))?;
        self.compare(&component, elements)
    }

    /// Matches and diffs a single decoded component.
    pub fn compare(
        &self,
        component: &DesignComponent,
        elements: &[ImplementationElement],
    ) -> Result<ComparisonResult> {
        let Some(candidate) = self.matcher.find_match(component, elements)? else {
            return Ok(unmatched(component));
        };

        let diff = self.differ.diff(component, candidate.element);
        let status = if diff.deviations.is_empty() {
            ComparisonStatus::Matches
        } else {
            ComparisonStatus::HasDeviations
        };

        Ok(ComparisonResult {
            component_id: component.id.clone(),
            component_name: component.name.clone(),
            component_type: component.component_type.as_str().to_string(),
            matched_selector: candidate.element.label(),
            status,
            deviations: diff.deviations,
            matches: diff.matches,
            match_score: Some(candidate.score),
        })
    }
}

/// Result for a component with no acceptable candidate.
pub fn unmatched(component: &DesignComponent) -> ComparisonResult {
    ComparisonResult {
        component_id: component.id.clone(),
        component_name: component.name.clone(),
        component_type: component.component_type.as_str().to_string(),
        matched_selector: None,
        status: ComparisonStatus::NoMatch,
        deviations: vec![existence_deviation(component)],
        matches: Vec::new(),
        match_score: None,
    }
}

pub fn existence_deviation(component: &DesignComponent) -> Deviation {
    let label = if component.name.is_empty() {
        component.id.as_str()
    } else {
        component.name.as_str()
    };
    Deviation {
        property: "existence".to_string(),
        expected_value: "exists".to_string(),
        actual_value: "not found".to_string(),
        difference_magnitude: None,
        severity: Severity::High,
        message: format!("No implementation element found for '{label}'"),
    }
}

fn raw_component_id(raw: &Value) -> String {
    match raw.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => "<unknown>".to_string(),
    }
}
