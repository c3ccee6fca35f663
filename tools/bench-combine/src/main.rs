use argh::FromArgs;
use bench_plots::prelude::*;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "Usage: bench-combine <base_name> <num_rates> <dir_1> <dir_2> ... <dir_n>";

/// Overlays the aggregated results of several benchmark runs on one chart
#[derive(FromArgs, Debug)]
pub struct Args {
    /// base name, number of rates, then one or more run directories
    #[argh(positional)]
    inputs: Vec<String>,

    /// directory holding the run directories; the chart is written here (default: results)
    #[argh(option, short = 'r', default = "PathBuf::from(DEFAULT_RESULTS_ROOT)")]
    results_root: PathBuf,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// only log warnings and errors
    #[argh(switch, short = 'q')]
    quiet: bool,
}

/// Log level used when `RUST_LOG` is not set.
fn default_log_level(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose, quiet))),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();
    init_logging(args.verbose, args.quiet);

    let Some(options) = CombineOptions::from_positionals(&args.inputs, args.results_root)? else {
        println!("{USAGE}");
        return Ok(());
    };
    debug!(
        base = %options.base_name,
        num_rates = options.num_rates,
        runs = options.runs.len(),
        "combining"
    );

    combine_results(&options)?;
    Ok(())
}
