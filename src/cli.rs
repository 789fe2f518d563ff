use clap::{Parser, Subcommand, ValueEnum};
use dqa_lib::{Severity, StrategyKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dqa")]
#[command(
    version,
    about = "Design QA - Compare a design extraction against a rendered page snapshot",
    long_about = "Design QA (DQA)\n\nPairs design-tool components with rendered DOM elements and reports property-level deviations (typography, color, spacing, border radius, dimensions) ranked by severity.\n\nBoth inputs are JSON files produced by extraction tools; dqa itself does not crawl or render anything."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) with tolerances, limits and severity tables; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare a design extraction against an implementation snapshot
    Compare {
        #[arg(
            long,
            value_name = "FILE",
            help = "Design extraction JSON (array of components or {components: [...]})"
        )]
        design: PathBuf,

        #[arg(
            long,
            value_name = "FILE",
            help = "Web extraction JSON (array of elements or {elements: [...]})"
        )]
        web: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(
            long,
            value_name = "N",
            help = "Components compared concurrently per chunk (overrides config)"
        )]
        chunk_size: Option<usize>,

        #[arg(long, value_enum, help = "Matching strategy (overrides config)")]
        strategy: Option<StrategyArg>,

        #[arg(
            long,
            value_enum,
            value_name = "SEVERITY",
            help = "Exit with code 1 when any deviation at or above this severity is found"
        )]
        fail_on: Option<FailOn>,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Weighted,
    Spatial,
}

impl From<StrategyArg> for StrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Weighted => StrategyKind::Weighted,
            StrategyArg::Spatial => StrategyKind::Spatial,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    Low,
    Medium,
    High,
}

impl From<FailOn> for Severity {
    fn from(value: FailOn) -> Self {
        match value {
            FailOn::Low => Severity::Low,
            FailOn::Medium => Severity::Medium,
            FailOn::High => Severity::High,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compare_with_overrides() {
        let cli = Cli::try_parse_from([
            "dqa",
            "--verbose",
            "compare",
            "--design",
            "design.json",
            "--web",
            "web.json",
            "--chunk-size",
            "4",
            "--strategy",
            "spatial",
            "--fail-on",
            "medium",
        ])
        .expect("valid args");

        assert!(cli.verbose);
        let Commands::Compare {
            design,
            chunk_size,
            strategy,
            fail_on,
            ..
        } = cli.command;
        assert_eq!(design, PathBuf::from("design.json"));
        assert_eq!(chunk_size, Some(4));
        assert_eq!(strategy, Some(StrategyArg::Spatial));
        assert_eq!(fail_on.map(Severity::from), Some(Severity::Medium));
    }

    #[test]
    fn web_input_is_required() {
        assert!(Cli::try_parse_from(["dqa", "compare", "--design", "d.json"]).is_err());
    }
}
