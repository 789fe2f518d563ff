use std::path::Path;

use dqa_lib::{Config, DqaError, StrategyKind};
use tracing::debug;

/// Compare flags that override config values when given.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOverrides {
    pub chunk_size: Option<usize>,
    pub strategy: Option<StrategyKind>,
}

/// Merge CLI overrides into the loaded config, preferring CLI when a flag is present.
pub fn resolve_compare_settings(
    mut config: Config,
    overrides: CompareOverrides,
) -> Result<Config, DqaError> {
    if let Some(chunk_size) = overrides.chunk_size {
        config.max_components_per_chunk = chunk_size;
    }
    if let Some(strategy) = overrides.strategy {
        config.matching.strategy = strategy;
    }
    config
        .validate()
        .map_err(|e| DqaError::Config(format!("Invalid compare settings: {}", e)))?;
    Ok(config)
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/dqa/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, DqaError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        DqaError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        DqaError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Log the effective config at debug level (visible with --verbose).
pub fn log_effective_config(config_path: Option<&Path>, config: &Config) {
    debug!("{}", format_effective_config(config, config_path));
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let t = &config.thresholds;
    format!(
        "Effective config [{source}]: strategy={}, acceptance>{:.2}, chunk={}, limits: strings={}, arrays={}, depth={}, tolerances: color={}, size={}px, spacing={}px, font-size={}px, children={}",
        config.matching.strategy,
        config.matching.acceptance_threshold,
        config.max_components_per_chunk,
        config.max_string_length,
        config.max_array_length,
        config.max_depth,
        t.color_difference,
        t.size_difference,
        t.spacing_difference,
        t.font_size_difference,
        config.include_children,
    )
}
