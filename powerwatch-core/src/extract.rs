//! Schedule extraction: raw provider content into per-day group records.
//!
//! The provider publishes one section per date, introduced by a header like
//! `Графік погодинних відключень на 01.03.2025` (optionally wrapped in
//! `<b>…</b>`). Inside a section each group gets a sentence such as
//! `Група 6.1. Електроенергії немає з 08:00 до 12:00.`

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::model::{DayRecord, Group, GroupRecord};
use crate::scan::Scanner;
use crate::time::section_date;

/// Phrase that opens every per-date section.
pub const SECTION_HEADER: &str = "Графік погодинних відключень на";

/// A group sentence containing this phrase means no outage at all.
pub const POWER_PRESENT: &str = "Електроенергія є";

/// Replacement text for a group with no outage.
pub const NO_OUTAGE: &str = "буде!!!!";

const MINUTES_PER_DAY: u32 = 24 * 60;

static OUTAGE_WINDOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"з\s+([0-9]{2}):([0-9]{2})\s+до\s+([0-9]{2}):([0-9]{2})")
        .expect("outage window pattern is valid")
});

/// Structural problems with an extraction request. Missing sections or
/// groups are never errors; they just produce fewer records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no target dates given")]
    NoTargetDates,

    #[error("target date {0} requested more than once")]
    DuplicateTargetDate(NaiveDate),
}

/// Extract one `DayRecord` per target date that has a section with at least
/// one tracked group. Output follows the order of `target_dates`.
pub fn extract(raw: &str, target_dates: &[NaiveDate]) -> Result<Vec<DayRecord>, ParseError> {
    if target_dates.is_empty() {
        return Err(ParseError::NoTargetDates);
    }
    for (i, date) in target_dates.iter().enumerate() {
        if target_dates[..i].contains(date) {
            return Err(ParseError::DuplicateTargetDate(*date));
        }
    }

    let headers = section_headers(raw);
    debug!(
        count = headers.len(),
        dates = ?headers.iter().map(|h| h.date).collect::<Vec<_>>(),
        "date headers found"
    );

    let mut out = Vec::new();
    for &date in target_dates {
        let title = section_date(date);
        let Some(section) = find_section(raw, &headers, &title) else {
            debug!(date = %title, "no section found");
            continue;
        };
        debug!(date = %title, preview = %preview(section, 500), "found section");

        let day = extract_day(date, section);
        if day.is_empty() {
            debug!(date = %title, "section has no tracked groups");
            continue;
        }
        out.push(day);
    }

    Ok(out)
}

/// Extract the tracked groups from a single section body.
pub fn extract_day(date: NaiveDate, section: &str) -> DayRecord {
    let mut day = DayRecord::new(date);
    for group in Group::TRACKED {
        let label = group.source_label();
        match group_fragment(section, label) {
            Some(fragment) => {
                let text = normalize(fragment);
                debug!(group = label, text = %text, "found group");
                day.groups.insert(group, GroupRecord::from_text(text));
            }
            None => debug!(group = label, "group not found in section"),
        }
    }
    day
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SectionHeader<'a> {
    /// Start of the header, including an opening `<b>`.
    start: usize,
    /// Start of the section body, past the date and an optional `</b>`.
    body: usize,
    date: &'a str,
}

/// Every `SECTION_HEADER` followed by whitespace and a `DD.MM.YYYY` date.
fn section_headers(raw: &str) -> Vec<SectionHeader<'_>> {
    let mut out = Vec::new();
    let mut sc = Scanner::new(raw);

    while let Some(at) = sc.skip_past(SECTION_HEADER) {
        let mut probe = sc;
        if probe.eat_whitespace() == 0 {
            continue;
        }
        let Some(date) = probe.take_chars(10) else {
            continue;
        };
        if !is_date_shaped(date) {
            continue;
        }
        probe.eat("</b>");

        let start = if raw[..at].ends_with("<b>") {
            at - "<b>".len()
        } else {
            at
        };
        out.push(SectionHeader {
            start,
            body: probe.position(),
            date,
        });
        sc = probe;
    }

    out
}

fn is_date_shaped(s: &str) -> bool {
    s.len() == 10
        && s.char_indices().all(|(i, c)| match i {
            2 | 5 => c == '.',
            _ => c.is_ascii_digit(),
        })
}

/// Body of the first section dated `title`, up to the next dated header.
fn find_section<'a>(raw: &'a str, headers: &[SectionHeader<'a>], title: &str) -> Option<&'a str> {
    let idx = headers.iter().position(|h| h.date == title)?;
    let end = headers.get(idx + 1).map(|h| h.start).unwrap_or(raw.len());
    Some(&raw[headers[idx].body..end])
}

/// The first sentence after a group label, terminator included.
fn group_fragment<'a>(section: &'a str, label: &str) -> Option<&'a str> {
    let mut sc = Scanner::new(section);
    sc.skip_past(label)?;
    let after_label = sc;

    // label, rest of its clause, optional period, then one sentence
    let mut primary = after_label;
    primary.eat_while(|c| c != '.');
    primary.eat(".");
    primary.eat_whitespace();
    if let Some(sentence) = primary.take_through('.') {
        if has_content(sentence) {
            return Some(sentence);
        }
    }

    // first non-empty sentence anywhere after the label clause; a bare "."
    // (as in `Група 6.1..`) is never taken as the group's text
    let mut fallback = after_label;
    fallback.skip_past(".")?;
    loop {
        fallback.eat_whitespace();
        let sentence = fallback.take_through('.')?;
        if has_content(sentence) {
            return Some(sentence);
        }
    }
}

fn has_content(sentence: &str) -> bool {
    !sentence.trim_end_matches('.').trim().is_empty()
}

/// Normalize a group sentence for display and comparison.
pub fn normalize(fragment: &str) -> String {
    let s = fragment.trim();
    let s = s
        .strip_prefix('—')
        .or_else(|| s.strip_prefix('–'))
        .unwrap_or(s)
        .trim();
    let s = collapse_spaces(&s.replace('\u{a0}', " "));

    if s.contains(POWER_PRESENT) {
        return NO_OUTAGE.to_string();
    }
    s.strip_suffix('.').unwrap_or(s.as_str()).to_string()
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        if c == ' ' && prev_space {
            continue;
        }
        prev_space = c == ' ';
        out.push(c);
    }
    out
}

/// A wall-clock outage window, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutageWindow {
    pub start: u32,
    pub end: u32,
}

impl OutageWindow {
    /// Length in minutes. An end earlier than the start wraps past midnight.
    pub fn minutes(self) -> u32 {
        if self.end >= self.start {
            self.end - self.start
        } else {
            self.end + MINUTES_PER_DAY - self.start
        }
    }
}

/// First `з HH:MM до HH:MM` window in `text`. `24:00` is accepted as end of day.
pub fn outage_window(text: &str) -> Option<OutageWindow> {
    let caps = OUTAGE_WINDOW_RE.captures(text)?;
    let start = clock_minutes(&caps[1], &caps[2])?;
    let end = clock_minutes(&caps[3], &caps[4])?;
    Some(OutageWindow { start, end })
}

/// Outage duration encoded in `text`, or 0 when there is no valid window.
pub fn outage_minutes(text: &str) -> u32 {
    outage_window(text).map(OutageWindow::minutes).unwrap_or(0)
}

fn clock_minutes(hours: &str, minutes: &str) -> Option<u32> {
    let h: u32 = hours.parse().ok()?;
    let m: u32 = minutes.parse().ok()?;
    match (h, m) {
        (24, 0) => Some(MINUTES_PER_DAY),
        (0..=23, 0..=59) => Some(h * 60 + m),
        _ => None,
    }
}

fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
