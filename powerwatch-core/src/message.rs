//! Notification text for a day's schedule.
//!
//! Messages use Telegram's legacy Markdown: `*bold*` for the title and the
//! group labels.

use crate::model::{DayRecord, Group};
use crate::time::short_date;

/// Shown for a tracked group that was not extracted for the day.
pub const NO_DATA: &str = "н/д";

/// Title line, before bold markup.
pub fn title(day: &DayRecord, is_update: bool, worsened: bool) -> String {
    let date = short_date(day.date);
    match (is_update, worsened) {
        (false, _) => format!("графік на {date}"),
        (true, true) => format!("upd. 😩 на {date}"),
        (true, false) => format!("upd. 🍾 на {date}"),
    }
}

fn group_line(day: &DayRecord, group: Group) -> String {
    let text = day.group(group).map(|g| g.text()).unwrap_or(NO_DATA);
    format!("{}: {}", group.message_label(), text)
}

/// Render the full message: bold title, then one line per tracked group.
pub fn format_message(day: &DayRecord, is_update: bool, worsened: bool) -> String {
    let mut lines = Vec::with_capacity(1 + Group::TRACKED.len());
    lines.push(format!("*{}*", title(day, is_update, worsened)));
    for group in Group::TRACKED {
        lines.push(group_line(day, group));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> DayRecord {
        DayRecord::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .with_group(Group::Power, "Електроенергії немає з 08:00 до 10:00")
    }

    #[test]
    fn first_announcement() {
        let msg = format_message(&day(), false, false);
        assert_eq!(
            msg,
            "*графік на 01.03*\n\
             *💡 світла не буде*: Електроенергії немає з 08:00 до 10:00\n\
             *💧 води не буде*: н/д"
        );
    }

    #[test]
    fn update_titles() {
        assert_eq!(title(&day(), true, true), "upd. 😩 на 01.03");
        assert_eq!(title(&day(), true, false), "upd. 🍾 на 01.03");
        // worsened only matters for updates
        assert_eq!(title(&day(), false, true), "графік на 01.03");
    }

    #[test]
    fn update_message_lists_both_groups() {
        let day = day().with_group(Group::Water, "буде!!!!");
        let msg = format_message(&day, true, false);
        let lines: Vec<_> = msg.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "*upd. 🍾 на 01.03*");
        assert_eq!(lines[2], "*💧 води не буде*: буде!!!!");
    }
}
