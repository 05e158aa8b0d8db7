use anyhow::{Context, Result};
use burstload::core::RunConfig;
use burstload::report::{write_html_report, DEFAULT_REPORT_PATH};
use burstload::target::HttpTarget;
use burstload::Scheduler;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "burstload", version)]
#[command(about = "Drive an HTTP endpoint with paced bursts of concurrent calls")]
struct Args {
    /// Number of simultaneous workers (users) per burst
    #[arg(short, long)]
    threads: u32,

    /// Endpoint under test
    #[arg(short, long)]
    endpoint: String,

    /// Request method; only GET is supported
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Test duration in seconds
    #[arg(short, long)]
    duration: u64,

    /// Sequential calls each worker makes per burst
    #[arg(short, long)]
    iterations: u32,

    /// Delay between bursts, e.g. "1s" or "250ms"
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    pace: Duration,

    /// Where to write the HTML report
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,

    /// Print the summary as JSON instead of a single line
    #[arg(long)]
    json: bool,
}

/// Validate the flags into a run configuration. Nothing has been sent yet.
fn run_config(args: &Args) -> Result<RunConfig> {
    let config = RunConfig::new(
        args.endpoint.clone(),
        &args.method,
        args.threads,
        args.iterations,
        Duration::from_secs(args.duration),
    )
    .context("Invalid run configuration")?;

    Ok(config.with_pace(args.pace))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = run_config(&args)?;

    let target = Arc::new(HttpTarget::new(&config));
    let outcome = Scheduler::new(config.clone(), target).run().await;

    write_html_report(&args.report, config.endpoint(), &outcome.summary)
        .with_context(|| format!("Failed to write report to {}", args.report.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
    } else {
        println!("{}", outcome.summary);
    }

    info!(
        "{} bursts in {}",
        outcome.bursts,
        humantime::format_duration(outcome.elapsed)
    );

    Ok(())
}
