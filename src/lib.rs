//! Design QA (DQA) Library
//!
//! Compares a structured design extraction (nodes from a design tool) against
//! a structured snapshot of a rendered page, pairing components with elements
//! and reporting property-level deviations ranked by severity.
//!
//! # Module Overview
//!
//! - [`engine`] - Matching, diffing, chunked aggregation and report assembly
//! - [`types`] - Design components, implementation elements and results
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output envelopes
//!
//! # Example
//!
//! ```no_run
//! use dqa_lib::{ComparisonEngine, Config};
//! use serde_json::json;
//!
//! # async fn example() -> dqa_lib::Result<()> {
//! let engine = ComparisonEngine::new(Config::default())?;
//! let design = json!([{"id": "1:1", "name": "Submit", "type": "RECTANGLE"}]);
//! let web = json!([{"tagName": "button", "text": "Submit"}]);
//!
//! let report = engine.compare(&design, &web).await?;
//! println!("{} deviations", report.summary.total_deviations);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod types;

pub use config::{Config, MatchingConfig, StrategyKind, Thresholds};
pub use engine::{
    top_issues, Clock, ComparisonEngine, FixedClock, Matcher, ScoringStrategy, SystemClock,
};
pub use error::{DqaError, ErrorCategory, ErrorPayload, Result};
pub use output::{CompareOutput, DqaOutput, ErrorOutput, DQA_OUTPUT_VERSION};
pub use types::{
    ComparisonReport, ComparisonResult, ComparisonStatus, DesignComponent, DesignDocument,
    Deviation, ImplementationElement, MatchRecord, Severity, Summary, WebDocument,
};
