use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use volley::{
    run_load_test, ReqwestClient, RunConfig, DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUESTS_PER_TICK,
    DEFAULT_TOTAL_REQUESTS,
};

#[derive(Parser, Debug)]
#[command(
    name = "volley",
    version,
    about = "Send a fixed number of GET requests to a URL at a steady rate",
    group(ArgGroup::new("target_url").required(true).args(["target", "url"]))
)]
struct Args {
    /// Target URL
    #[arg(value_name = "URL")]
    target: Option<String>,

    /// Target URL, as an alternative to the positional argument
    #[arg(long)]
    url: Option<String>,

    /// Total number of requests to send
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOTAL_REQUESTS)]
    requests: u64,

    /// Maximum number of requests in flight at once
    #[arg(short, long, default_value_t = DEFAULT_MAX_CONCURRENCY.get())]
    concurrency: usize,

    /// Requests released on every tick
    #[arg(short, long, default_value_t = DEFAULT_REQUESTS_PER_TICK.get())]
    rate: u32,

    /// Time between ticks (e.g. `1s`, `250ms`)
    #[arg(short, long, default_value = "1s", value_parser = humantime::parse_duration)]
    interval: Duration,

    /// Give up on a single request after this long; counted as a transport failure
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Log filter directive
    #[arg(long, default_value = "volley=info")]
    log: String,
}

impl Args {
    fn target_url(&self) -> &str {
        self.target
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    FmtSubscriber::builder()
        .with_env_filter(args.log.as_str())
        .with_writer(std::io::stderr)
        .init();

    info!("volley {} starting", env!("CARGO_PKG_VERSION"));

    let config = RunConfig::try_new(
        args.target_url(),
        args.requests,
        args.concurrency,
        args.rate,
        args.interval,
    )
    .context("invalid load test configuration")?;

    let client = ReqwestClient::new(args.timeout).context("failed to construct HTTP client")?;

    let report = run_load_test(config, client).await?;
    println!("{report}");

    Ok(())
}
