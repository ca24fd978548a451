use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args};
use powerwatch_core::{DEFAULT_TIMEZONE, parse_timezone};
use powerwatch_ingest::MENUS_URL;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_STATE_PATH: &str = "/var/lib/powerwatch/state.json";
pub const TELEGRAM_API: &str = "https://api.telegram.org";

/// Process settings. Each flag can also come from the environment.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// State file location
    #[arg(long, env = "STATE_PATH", default_value = DEFAULT_STATE_PATH, global = true)]
    pub state_path: PathBuf,

    /// Read the schedule page from this file instead of fetching it
    #[arg(long, env = "TEST_FIXTURE_PATH", global = true)]
    pub fixture: Option<PathBuf>,

    /// Telegram bot token
    #[arg(long, env = "NOTIFIER_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Telegram chat to post to
    #[arg(long, env = "NOTIFIER_CHAT_ID", global = true)]
    pub chat_id: Option<String>,

    /// Verbose diagnostics
    #[arg(
        long,
        env = "DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        global = true
    )]
    pub debug: bool,

    /// Menus API endpoint
    #[arg(long, env = "SOURCE_URL", default_value = MENUS_URL, global = true)]
    pub source_url: String,

    /// IANA timezone that defines "today"
    #[arg(long, env = "TIMEZONE", default_value = DEFAULT_TIMEZONE, global = true)]
    pub timezone: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "NOTIFIER_API", default_value = TELEGRAM_API, global = true)]
    pub notifier_api: String,
}

/// Resolved configuration, built once at startup and passed down.
#[derive(Debug, Clone)]
pub struct Config {
    pub state_path: PathBuf,
    pub fixture: Option<PathBuf>,
    pub source_url: String,
    pub timezone: Tz,
    pub notifier: Option<NotifierConfig>,
    pub debug: bool,
}

#[derive(Clone)]
pub struct NotifierConfig {
    pub api_base: String,
    pub token: String,
    pub chat_id: String,
}

impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ConfigArgs {
    pub fn into_config(self) -> Result<Config> {
        let timezone = parse_timezone(&self.timezone).context("TIMEZONE")?;

        // Posting needs both; either one alone just disables it.
        let notifier = match (non_empty(self.token), non_empty(self.chat_id)) {
            (Some(token), Some(chat_id)) => Some(NotifierConfig {
                api_base: self.notifier_api,
                token,
                chat_id,
            }),
            _ => None,
        };

        Ok(Config {
            state_path: self.state_path,
            fixture: self.fixture.filter(|p| !p.as_os_str().is_empty()),
            source_url: self.source_url,
            timezone,
            notifier,
            debug: self.debug,
        })
    }
}
