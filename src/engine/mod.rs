//! Design/implementation comparison engine.
//!
//! [`ComparisonEngine`] bounds both inputs, pairs every design component with
//! its best implementation element, diffs each pair and assembles the report.
//! It holds no state between runs beyond its configuration.

pub mod aggregate;
pub mod assemble;
pub mod color;
pub mod differ;
pub mod issues;
pub mod matcher;
pub mod sanitize;
pub mod severity;
pub mod similarity;
pub mod typography;


use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{DqaError, Result};
use crate::types::{
    ComparisonReport, DesignDocument, FigmaMetadata, ImplementationElement, WebDocument,
    WebMetadata,
};

pub use aggregate::{AggregateOutcome, Aggregator};
pub use assemble::{Clock, FixedClock, ResultAssembler, SystemClock};
pub use differ::{Differencer, PropertyDiff};
pub use issues::top_issues;
pub use matcher::{strategy_for, MatchCandidate, Matcher, ScoringStrategy};
pub use sanitize::{chunk, Sanitizer};
pub use severity::{SeverityCategory, SeverityTable, SeverityTables};

pub struct ComparisonEngine {
    config: Config,
    sanitizer: Sanitizer,
    aggregator: Aggregator,
    assembler: ResultAssembler,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ComparisonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonEngine")
            .field("config", &self.config)
            .field("aggregator", &self.aggregator)
            .finish_non_exhaustive()
    }
}

impl ComparisonEngine {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sanitizer: Sanitizer::from_config(&config),
            aggregator: Aggregator::from_config(&config),
            assembler: ResultAssembler::new(config.max_string_length),
            clock: Arc::new(SystemClock),
            config,
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the configured scoring strategy, keeping the acceptance threshold.
    pub fn with_strategy(mut self, strategy: Arc<dyn ScoringStrategy>) -> Self {
        let matcher = Matcher::new(strategy, self.config.matching.acceptance_threshold);
        self.aggregator = self.aggregator.with_matcher(matcher);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compares raw extraction output.
    ///
    /// `design` is either an array of components or an object with a
    /// `components` array; `web` likewise with `elements`. Anything else is a
    /// fatal [`DqaError::RunFailure`]. Components or elements that fail to
    /// decode are skipped with a warning.
    pub async fn compare(&self, design: &Value, web: &Value) -> Result<ComparisonReport> {
        let (design_meta, raw_components) = split_input(design, "components", "design")?;
        let (web_meta, raw_elements) = split_input(web, "elements", "web")?;
        let original_component_count = raw_components.len();
        let original_element_count = raw_elements.len();

        let mut components = self.bounded_list(raw_components);
        if self.config.include_children {
            components = self.sanitizer.flatten_children(components);
        }
        let elements = decode_elements(self.bounded_list(raw_elements));

        let mut outcome = self.aggregator.run(&components, &elements).await;
        outcome.stats.original_component_count = original_component_count;
        outcome.stats.original_element_count = original_element_count;

        let figma = FigmaMetadata {
            file_id: string_field(design_meta, "fileId"),
            file_name: string_field(design_meta, "fileName"),
            extracted_at: string_field(design_meta, "extractedAt"),
            total_components: original_component_count,
        };
        let web = WebMetadata {
            url: string_field(web_meta, "url"),
            extracted_at: string_field(web_meta, "extractedAt"),
            total_elements: original_element_count,
        };

        let report = self
            .assembler
            .assemble(outcome, figma, web, self.clock.as_ref());
        info!(
            components = report.summary.total_components,
            deviations = report.summary.total_deviations,
            unmatched = report.summary.unmatched_components,
            failed = report.metadata.processing_stats.components_failed,
            "comparison finished"
        );
        Ok(report)
    }

    /// Compares already-decoded documents.
    pub async fn compare_documents(
        &self,
        design: &DesignDocument,
        web: &WebDocument,
    ) -> Result<ComparisonReport> {
        let design = serde_json::to_value(design)?;
        let web = serde_json::to_value(web)?;
        self.compare(&design, &web).await
    }

    /// Caps the list length and sanitizes each item as its own root, so the
    /// depth cap never removes a whole top-level item.
    fn bounded_list(&self, items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .take(self.sanitizer.max_array_length)
            .map(|item| self.sanitizer.sanitize(item.clone()))
            .collect()
    }
}

fn split_input<'a>(
    value: &'a Value,
    key: &str,
    source: &str,
) -> Result<(Option<&'a Map<String, Value>>, &'a [Value])> {
    match value {
        Value::Array(items) => Ok((None, items.as_slice())),
        Value::Object(map) => match map.get(key) {
            Some(Value::Array(items)) => Ok((Some(map), items.as_slice())),
            Some(_) => Err(DqaError::run_failure(format!(
                "{source} input field `{key}` must be an array"
            ))),
            None => Err(DqaError::run_failure(format!(
                "{source} input object has no `{key}` array"
            ))),
        },
        other => Err(DqaError::run_failure(format!(
            "{source} input must be an array or an object, got {}",
            json_kind(other)
        ))),
    }
}

fn decode_elements(raw: Vec<Value>) -> Vec<ImplementationElement> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match ImplementationElement::deserialize(&value) {
            Ok(element) => Some(element),
            Err(err) => {
                warn!(index, error = %err, "skipping undecodable element");
                None
            }
        })
        .collect()
}

fn string_field(map: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    map?.get(key)?.as_str().map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
