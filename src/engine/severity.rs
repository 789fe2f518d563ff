//! Severity classification for numeric deviations.
//!
//! Every numeric comparator routes its magnitude through [`SeverityTables::classify`];
//! categorical mismatches use fixed severities chosen by the differencer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DqaError;
use crate::types::Severity;
use crate::Result;

/// Property category selecting a threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityCategory {
    Color,
    FontSize,
    Spacing,
    Size,
}

impl SeverityCategory {
    pub const fn all() -> [SeverityCategory; 4] {
        [
            SeverityCategory::Color,
            SeverityCategory::FontSize,
            SeverityCategory::Spacing,
            SeverityCategory::Size,
        ]
    }
}

impl fmt::Display for SeverityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeverityCategory::Color => "color",
            SeverityCategory::FontSize => "font_size",
            SeverityCategory::Spacing => "spacing",
            SeverityCategory::Size => "size",
        })
    }
}

/// Lower bounds (inclusive) for the `high` and `medium` buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityTable {
    pub high: f64,
    pub medium: f64,
}

impl SeverityTable {
    pub const fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }

    pub fn classify(&self, magnitude: f64) -> Severity {
        let magnitude = magnitude.abs();
        if magnitude >= self.high {
            Severity::High
        } else if magnitude >= self.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityTables {
    pub color: SeverityTable,
    pub font_size: SeverityTable,
    pub spacing: SeverityTable,
    pub size: SeverityTable,
}

impl Default for SeverityTables {
    fn default() -> Self {
        Self {
            color: SeverityTable::new(50.0, 20.0),
            font_size: SeverityTable::new(6.0, 3.0),
            spacing: SeverityTable::new(10.0, 5.0),
            size: SeverityTable::new(20.0, 10.0),
        }
    }
}

impl SeverityTables {
    pub fn table(&self, category: SeverityCategory) -> &SeverityTable {
        match category {
            SeverityCategory::Color => &self.color,
            SeverityCategory::FontSize => &self.font_size,
            SeverityCategory::Spacing => &self.spacing,
            SeverityCategory::Size => &self.size,
        }
    }

    pub fn classify(&self, category: SeverityCategory, magnitude: f64) -> Severity {
        self.table(category).classify(magnitude)
    }

    pub fn validate(&self) -> Result<()> {
        for category in SeverityCategory::all() {
            let table = self.table(category);
            if !table.high.is_finite() || !table.medium.is_finite() || table.medium < 0.0 {
                return Err(DqaError::Config(format!(
                    "severity table for {category} must hold non-negative numbers"
                )));
            }
            if table.medium > table.high {
                return Err(DqaError::Config(format!(
                    "severity table for {category}: medium ({}) exceeds high ({})",
                    table.medium, table.high
                )));
            }
        }
        Ok(())
    }
}
