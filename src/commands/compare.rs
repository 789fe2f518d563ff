use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dqa_lib::{
    top_issues, CompareOutput, ComparisonEngine, DqaError, DqaOutput, Severity,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_compare, render_error, write_output};
use crate::settings::{
    load_config, log_effective_config, resolve_compare_settings, CompareOverrides,
};

/// Number of ranked issues carried in the output envelope.
const MAX_TOP_ISSUES: usize = 10;

/// Arguments of the compare subcommand after clap parsing.
pub struct CompareArgs {
    pub config_path: Option<PathBuf>,
    pub design: PathBuf,
    pub web: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub overrides: CompareOverrides,
    pub fail_on: Option<Severity>,
}

/// Run the compare command.
pub async fn run_compare(args: CompareArgs) -> ExitCode {
    let CompareArgs {
        config_path,
        design,
        web,
        format,
        output,
        overrides,
        fail_on,
    } = args;

    let config = match load_config(config_path.as_deref())
        .and_then(|cfg| resolve_compare_settings(cfg, overrides))
    {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    log_effective_config(config_path.as_deref(), &config);

    let design_value = match read_snapshot(&design) {
        Ok(value) => value,
        Err(err) => return render_error(err, format, output),
    };
    let web_value = match read_snapshot(&web) {
        Ok(value) => value,
        Err(err) => return render_error(err, format, output),
    };

    let engine = match ComparisonEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => return render_error(err, format, output),
    };
    let report = match engine.compare(&design_value, &web_value).await {
        Ok(report) => report,
        Err(err) => return render_error(err, format, output),
    };

    let max_severity = report.summary.max_severity();
    let issues = top_issues(
        &report,
        MAX_TOP_ISSUES,
        engine.config().max_string_length,
    );
    let body = DqaOutput::Compare(CompareOutput::new(report, issues));

    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(
            DqaError::Unknown(format!("Failed to write output: {}", err)),
            format,
            output,
        );
    }

    exit_code_for_compare(max_severity, fail_on)
}

/// Reads and parses one extraction snapshot.
fn read_snapshot(path: &Path) -> Result<Value, DqaError> {
    debug!(path = %path.display(), "reading snapshot");
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DqaError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    let value = serde_json::from_str(&raw)?;
    Ok(value)
}
