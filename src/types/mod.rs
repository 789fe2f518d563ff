//! Data model for design components, implementation elements and results.

pub mod core;
pub mod design;
pub mod implementation;
pub mod results;

pub use self::core::{format_number, parse_px, Dimensions, StyleValue};
pub use design::{
    ComponentType, DesignColor, DesignComponent, DesignDocument, DesignTextStyle, Paint,
};
pub use implementation::{ElementStyles, ImplementationElement, WebDocument};
pub use results::{
    ComparisonReport, ComparisonResult, ComparisonStatus, Deviation, FigmaMetadata, MatchRecord,
    ProcessingStats, ReportMetadata, Severity, SeverityCounts, Summary, WebMetadata,
};
