use argh::FromArgs;
use bench_plots::prelude::*;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "Usage: bench-aggregate <results_directory>";

/// Aggregates per-rate benchmark results into per-phase CSVs and charts
#[derive(FromArgs, Debug)]
pub struct Args {
    /// directory containing the <phase>_<rate>rps.json result files
    #[argh(positional)]
    results_dir: Option<PathBuf>,

    /// JSON file listing the phases and rates to aggregate (default: built-in plan)
    #[argh(option, short = 'p')]
    plan: Option<PathBuf>,

    /// only write the CSVs, skip chart rendering
    #[argh(switch)]
    no_charts: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// only log warnings and errors, don't print summary tables
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

    let Some(results_dir) = args.results_dir.clone() else {
        println!("{USAGE}");
        std::process::exit(1);
    };

    init_logging(args.verbose, args.quiet);

    let plan = match &args.plan {
        Some(path) => PhasePlan::from_json_file(path)?,
        None => PhasePlan::default(),
    };
    debug!(phases = plan.phases.len(), dir = %results_dir.display(), "aggregating");

    let options = AggregateOptions {
        results_dir,
        plan,
        render_charts: !args.no_charts,
    };
    process_results_with(&options, |outcome| {
        if !args.quiet {
            println!("{}\n", format_phase_table(&outcome.set, &outcome.split));
        }
    })?;

    Ok(())
}
