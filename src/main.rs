mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_compare, CompareArgs};
use settings::CompareOverrides;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Compare {
            design,
            web,
            format,
            output,
            chunk_size,
            strategy,
            fail_on,
        } => {
            run_compare(CompareArgs {
                config_path: args.config,
                design,
                web,
                format,
                output,
                overrides: CompareOverrides {
                    chunk_size,
                    strategy: strategy.map(Into::into),
                },
                fail_on: fail_on.map(Into::into),
            })
            .await
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
