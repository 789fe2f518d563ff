use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dqa_lib::{DqaError, DqaOutput, ErrorOutput, Severity};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &DqaOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: DqaError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let payload = DqaOutput::Error(ErrorOutput::new(err.to_payload()));

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is reserved for errors; --fail-on hits use 1.
    ExitCode::from(2)
}

fn write_json_output(body: &DqaOutput, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_pretty_output(body: &DqaOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &DqaOutput, colorize: bool) -> String {
    match body {
        DqaOutput::Compare(out) => {
            let mut buf = String::new();
            let report = &out.report;
            let summary = &report.summary;
            let clean = summary.total_deviations == 0;
            let status = color(
                if clean { "CLEAN" } else { "DEVIATIONS" },
                if clean { "32" } else { severity_color_code(summary.max_severity()) },
                colorize,
            );
            writeln!(buf, "{} Design QA comparison", status).ok();

            let figma = &report.metadata.figma;
            let design_label = figma
                .file_name
                .as_deref()
                .or(figma.file_id.as_deref())
                .unwrap_or("design snapshot");
            let web_label = report.metadata.web.url.as_deref().unwrap_or("web snapshot");
            writeln!(buf, "Design: {design_label}  Implementation: {web_label}").ok();

            let stats = &report.metadata.processing_stats;
            writeln!(
                buf,
                "Components: {} compared, {} unmatched, {} failed",
                summary.total_components, summary.unmatched_components, stats.components_failed
            )
            .ok();
            let counts = &summary.severity_counts;
            writeln!(
                buf,
                "Deviations: {} ({} high, {} medium, {} low), matches: {}",
                summary.total_deviations,
                color(&counts.high.to_string(), "31", colorize && counts.high > 0),
                color(&counts.medium.to_string(), "33", colorize && counts.medium > 0),
                counts.low,
                summary.total_matches
            )
            .ok();

            let issues: Vec<&String> = out.top_issues.iter().take(5).collect();
            if !issues.is_empty() {
                writeln!(buf, "Top issues (max 5):").ok();
                for issue in issues {
                    writeln!(buf, "- {issue}").ok();
                }
            }
            buf
        }
        DqaOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or(out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn severity_color_code(severity: Option<Severity>) -> &'static str {
    match severity {
        Some(Severity::High) => "31", // red
        Some(Severity::Medium) => "33", // yellow
        _ => "36",
    }
}

/// Determine exit code for compare command.
pub fn exit_code_for_compare(max_severity: Option<Severity>, fail_on: Option<Severity>) -> ExitCode {
    match (max_severity, fail_on) {
        (Some(found), Some(limit)) if found >= limit => ExitCode::from(1),
        _ => ExitCode::SUCCESS,
    }
}
