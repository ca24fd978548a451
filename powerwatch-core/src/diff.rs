//! Change detection between a stored day and a freshly extracted one.

use crate::model::{DayRecord, Group};

/// How a freshly extracted day relates to what was stored for that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayChange {
    /// No record for this date yet.
    Unseen,
    Unchanged,
    /// Some group's text differs. `worsened` is set when a changed group's
    /// outage got longer.
    Changed { worsened: bool },
}

/// Compare two versions of a day, returning `(changed, worsened)`.
///
/// A group missing on one side counts as a change, and a missing previous
/// group counts as zero minutes.
pub fn compare_days(previous: Option<&DayRecord>, current: &DayRecord) -> (bool, bool) {
    let mut changed = false;
    let mut worsened = false;

    for group in Group::TRACKED {
        let old = previous.and_then(|p| p.group(group));
        let new = current.group(group);

        let differs = match (old, new) {
            (None, None) => continue,
            (Some(o), Some(n)) => o.text() != n.text(),
            _ => true,
        };
        if !differs {
            continue;
        }

        changed = true;
        let old_minutes = old.map(|o| o.minutes()).unwrap_or(0);
        let new_minutes = new.map(|n| n.minutes()).unwrap_or(0);
        if new_minutes > old_minutes {
            worsened = true;
        }
    }

    (changed, worsened)
}

/// Classify `current` against the stored record for the same date.
pub fn classify(previous: Option<&DayRecord>, current: &DayRecord) -> DayChange {
    let Some(previous) = previous else {
        return DayChange::Unseen;
    };
    match compare_days(Some(previous), current) {
        (false, _) => DayChange::Unchanged,
        (true, worsened) => DayChange::Changed { worsened },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> DayRecord {
        DayRecord::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    #[test]
    fn longer_outage_is_worse() {
        let prev = day().with_group(Group::Power, "немає з 10:00 до 11:00");
        let cur = day().with_group(Group::Power, "немає з 10:00 до 11:30");
        assert_eq!(compare_days(Some(&prev), &cur), (true, true));
        assert_eq!(classify(Some(&prev), &cur), DayChange::Changed { worsened: true });
    }

    #[test]
    fn shorter_outage_is_better() {
        let prev = day().with_group(Group::Power, "немає з 10:00 до 11:00");
        let cur = day().with_group(Group::Power, "немає з 12:00 до 12:30");
        assert_eq!(compare_days(Some(&prev), &cur), (true, false));
    }

    #[test]
    fn same_duration_different_text_is_not_worse() {
        let prev = day().with_group(Group::Power, "немає з 10:00 до 11:00");
        let cur = day().with_group(Group::Power, "немає з 14:00 до 15:00");
        assert_eq!(compare_days(Some(&prev), &cur), (true, false));
    }

    #[test]
    fn identical_text_is_unchanged() {
        let prev = day()
            .with_group(Group::Power, "немає з 10:00 до 11:00")
            .with_group(Group::Water, "буде!!!!");
        let cur = prev.clone();
        assert_eq!(compare_days(Some(&prev), &cur), (false, false));
        assert_eq!(classify(Some(&prev), &cur), DayChange::Unchanged);
    }

    #[test]
    fn group_appearing_counts_from_zero() {
        let prev = day().with_group(Group::Water, "буде!!!!");
        let cur = day()
            .with_group(Group::Water, "буде!!!!")
            .with_group(Group::Power, "немає з 10:00 до 11:00");
        assert_eq!(compare_days(Some(&prev), &cur), (true, true));
    }

    #[test]
    fn group_disappearing_is_a_better_change() {
        let prev = day()
            .with_group(Group::Power, "немає з 10:00 до 11:00")
            .with_group(Group::Water, "буде!!!!");
        let cur = day().with_group(Group::Water, "буде!!!!");
        assert_eq!(compare_days(Some(&prev), &cur), (true, false));
    }

    #[test]
    fn missing_previous_is_unseen() {
        let cur = day().with_group(Group::Power, "немає з 10:00 до 11:00");
        assert_eq!(classify(None, &cur), DayChange::Unseen);
        assert_eq!(compare_days(None, &cur), (true, true));
    }
}
