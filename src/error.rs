use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DqaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Comparison failed for component '{component_id}': {message}")]
    ComponentComparison {
        component_id: String,
        message: String,
    },

    #[error("Comparison run failed: {0}")]
    RunFailure(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DqaError {
    pub fn component(component_id: impl Into<String>, message: impl Into<String>) -> Self {
        DqaError::ComponentComparison {
            component_id: component_id.into(),
            message: message.into(),
        }
    }

    pub fn run_failure(message: impl Into<String>) -> Self {
        DqaError::RunFailure(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DqaError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            DqaError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the design and web snapshots are valid JSON.",
            ),
            DqaError::ConfigParse(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Fix the TOML syntax in the config file (see README for keys).",
            ),
            DqaError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("chunk") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a chunk size of at least 1 (--chunk-size or max_components_per_chunk).",
                    )
                } else if lower.contains("severity") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Severity tables need high >= medium >= 0 for every category.",
                    )
                } else if lower.contains("threshold") || lower.contains("tolerance") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Tolerances must be non-negative; the acceptance threshold must lie in [0, 1).",
                    )
                } else if lower.contains("file not found") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Verify the file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and config values.",
                    )
                }
            }
            DqaError::ComponentComparison { .. } => ErrorPayload::new(
                ErrorCategory::Comparison,
                self.to_string(),
                "Inspect the component in the design snapshot; re-run with --verbose for details.",
            ),
            DqaError::RunFailure(_) => ErrorPayload::new(
                ErrorCategory::Input,
                self.to_string(),
                "Top-level inputs must be a component/element array or an object with `components`/`elements` arrays.",
            ),
            DqaError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, DqaError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Input,
    Comparison,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_failure_payload_is_input_category() {
        let err = DqaError::run_failure("design components must be an array");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        assert!(payload.message.starts_with("Comparison run failed"));
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("components"),
            "expected remediation to mention the expected shape, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = DqaError::Config("Some other config issue".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("Check flags/paths"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn config_payload_includes_chunk_hint() {
        let err = DqaError::Config("max_components_per_chunk must be at least 1".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("--chunk-size"),
            "expected chunk-size remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_includes_severity_hint() {
        let err = DqaError::Config("severity table for color: medium exceeds high".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("high >= medium"),
            "expected severity remediation, got: {remediation}"
        );
    }

    #[test]
    fn component_payload_names_component() {
        let err = DqaError::component("12:7", "invalid type: string, expected struct Dimensions");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Comparison);
        assert!(payload.message.contains("12:7"));
    }
}
