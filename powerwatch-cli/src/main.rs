use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use powerwatch_core::reference_dates;
use powerwatch_ingest::{ContentProvider, FixtureProvider, MenuApiProvider};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod notifier;
mod run;
mod store;

use config::{Config, ConfigArgs};
use notifier::TelegramNotifier;
use run::{Dispatch, fetch_and_extract, run_once};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("POWERWATCH_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "powerwatch",
    version = VERSION,
    about = "Watches the LOE outage schedule and posts changes to Telegram"
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Fetch, compare with saved state, post new or changed schedules, save (default)
    Run,

    /// Fetch and print today's and tomorrow's parsed schedule as JSON; no state, no posts
    Preview,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.into_config()?;
    init_tracing(config.debug);
    debug!(version = VERSION, ?config, "configuration loaded");

    let provider = provider_for(&config);
    let dates = reference_dates(Utc::now(), config.timezone);

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => watch(&config, provider.as_ref(), dates).await,
        Command::Preview => {
            let days = fetch_and_extract(provider.as_ref(), &dates).await?;
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
    }

    Ok(())
}

/// A full cycle. Failures are logged; the process still exits cleanly so the
/// scheduler just tries again next time.
async fn watch(config: &Config, provider: &dyn ContentProvider, dates: [chrono::NaiveDate; 2]) {
    let telegram = config
        .notifier
        .as_ref()
        .map(|n| (TelegramNotifier::new(&n.api_base, &n.token), n.chat_id.as_str()));
    if telegram.is_none() {
        warn!("NOTIFIER_TOKEN or NOTIFIER_CHAT_ID not set, skipping Telegram posts");
    }
    let dispatch = telegram.as_ref().map(|(notifier, chat_id)| Dispatch {
        notifier,
        chat_id,
    });

    match run_once(provider, dispatch, &config.state_path, dates).await {
        Ok(report) => info!(?report, "run complete"),
        Err(e) => error!("{e}"),
    }
}

fn provider_for(config: &Config) -> Box<dyn ContentProvider> {
    match &config.fixture {
        Some(path) => Box::new(FixtureProvider::new(path)),
        None => Box::new(MenuApiProvider::new(&config.source_url)),
    }
}

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,powerwatch={level},powerwatch_core={level},powerwatch_ingest={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
