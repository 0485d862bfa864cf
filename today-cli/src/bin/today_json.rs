//! `today-json` - print today's calendar events as one line of compact
//! JSON, for piping into other tools.

use clap::Parser;
use owo_colors::OwoColorize;
use today_core::TodayResult;
use today_core::today_config::TodayConfig;
use today_core::schedule::today_schedule;
use today_core::store::Store;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "today-json", version)]
#[command(about = "Print today's calendar events as one line of JSON")]
struct Cli {}

#[tokio::main]
async fn main() {
    Cli::parse();
    init_logging();

    if let Err(e) = run().await {
        eprintln!("{}", e.to_string().red());
        std::process::exit(e.exit_code());
    }
}

async fn run() -> TodayResult<()> {
    let config = TodayConfig::load()?;
    let store = Store::from_config(&config);
    tracing::debug!(backend = store.name(), "querying store");

    let schedule = today_schedule(&store).await?;

    println!("{}", schedule.to_json()?);
    Ok(())
}

/// Log to stderr only; stdout carries the payload.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
