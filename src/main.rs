//! tcprobe binary entry point.
//!
//! Parses arguments, validates inputs before any network activity, runs
//! the scan, persists results, and prints the summary.

use clap::Parser;
use tcprobe::cli::Args;
use tcprobe::error::CliResult;
use tcprobe::scanner::run_scan_with_cancel;
use tcprobe::sink::{JsonFileSink, ResultSink};
use tcprobe::output;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tcprobe={default}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: &Args) -> CliResult<()> {
    // Both validations happen before any socket is opened.
    let target = args.parse_target()?;
    let range = args.parse_range()?;
    let config = args.scan_config();

    info!(
        target = %target,
        ports = %range,
        concurrency = config.max_concurrency,
        timeout_ms = config.connect_timeout.as_millis() as u64,
        banner = config.collect_banner,
        "starting scan"
    );

    // Ctrl-C aborts outstanding probes; partial results are still reported.
    let cancel = CancellationToken::new();
    let cancel_ctrlc = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_ctrlc.cancel();
        }
    });

    let report = run_scan_with_cancel(&target, range, &config, cancel).await?;

    if report.results.is_empty() {
        warn!("no open ports found");
    } else {
        let sink = JsonFileSink::new(&args.output);
        sink.persist(&report.results).await?;
        info!(open_ports = ?report.open_ports(), "scan complete");
    }
    info!(duration_ms = report.duration_ms, "total time");

    output::print_report(&report).map_err(tcprobe::error::ScanError::Io)?;

    Ok(())
}
