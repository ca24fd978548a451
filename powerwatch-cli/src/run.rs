//! One watch cycle: fetch, extract, compare with saved state, notify, save.

use chrono::NaiveDate;
use powerwatch_core::{
    DayChange, DayRecord, ParseError, classify, extract, format_message, section_date,
};
use powerwatch_ingest::{ContentProvider, FetchError};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::notifier::Notifier;
use crate::store;

/// Errors that end a run before state is touched.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("error fetching: {0}")]
    Fetch(#[from] FetchError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Where announcements go, when posting is configured.
pub struct Dispatch<'a> {
    pub notifier: &'a dyn Notifier,
    pub chat_id: &'a str,
}

/// What a run did, for the closing log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub parsed: usize,
    pub announced: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub delivery_failures: usize,
    pub persisted: bool,
}

/// Fetch the schedule page and extract the target dates.
pub async fn fetch_and_extract(
    provider: &dyn ContentProvider,
    dates: &[NaiveDate],
) -> Result<Vec<DayRecord>, RunError> {
    let raw = provider.fetch().await?;
    debug!(bytes = raw.len(), source = %provider.source(), "fetched content");
    Ok(extract(&raw, dates)?)
}

pub async fn run_once(
    provider: &dyn ContentProvider,
    dispatch: Option<Dispatch<'_>>,
    state_path: &Path,
    dates: [NaiveDate; 2],
) -> Result<RunReport, RunError> {
    let parsed = fetch_and_extract(provider, &dates).await?;
    info!(
        "parsed {} days (looking for {} and {})",
        parsed.len(),
        section_date(dates[0]),
        section_date(dates[1])
    );
    if parsed.is_empty() {
        warn!("no schedules found for today or tomorrow");
    }
    for day in &parsed {
        info!(date = %day.date, groups = day.groups.len(), "found schedule");
        for (group, record) in &day.groups {
            info!("  {} => {} (mins={})", group.source_label(), record.text(), record.minutes());
        }
    }

    let mut state = store::load_or_default(state_path);
    let mut report = RunReport {
        parsed: parsed.len(),
        ..RunReport::default()
    };

    for day in parsed {
        let (is_update, worsened) = match classify(state.day(day.date), &day) {
            DayChange::Unchanged => {
                info!(date = %day.date, "schedule unchanged, skipping");
                report.unchanged += 1;
                continue;
            }
            DayChange::Unseen => {
                info!(date = %day.date, "new schedule, posting");
                report.announced += 1;
                (false, false)
            }
            DayChange::Changed { worsened } => {
                info!(date = %day.date, worsened, "schedule changed, posting update");
                report.updated += 1;
                (true, worsened)
            }
        };

        if let Some(dispatch) = &dispatch {
            let message = format_message(&day, is_update, worsened);
            match dispatch.notifier.send(dispatch.chat_id, &message).await {
                Ok(()) => info!(date = %day.date, "posted successfully"),
                Err(e) => {
                    error!(date = %day.date, error = %e, "post error");
                    report.delivery_failures += 1;
                }
            }
        }

        // Recorded even when delivery failed; posting is best effort.
        state.upsert(day);
    }

    state.prune(&dates);
    match store::save_state(state_path, &state) {
        Ok(()) => report.persisted = true,
        Err(e) => error!(error = %e, "state save error"),
    }

    Ok(report)
}
