//! Per-day, per-group outage records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::extract::outage_minutes;

/// One of the two tracked utility groups.
///
/// Serialized under the provider's own group label, which is also the key
/// used in the state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Group {
    #[serde(rename = "Група 6.1")]
    Power,
    #[serde(rename = "Група 4.1")]
    Water,
}

impl Group {
    /// Tracked groups in message order.
    pub const TRACKED: [Group; 2] = [Group::Power, Group::Water];

    /// Label as it appears in the provider's schedule text.
    pub fn source_label(self) -> &'static str {
        match self {
            Group::Power => "Група 6.1",
            Group::Water => "Група 4.1",
        }
    }

    /// Bold emoji label used for this group's line in a notification.
    pub fn message_label(self) -> &'static str {
        match self {
            Group::Power => "*💡 світла не буде*",
            Group::Water => "*💧 води не буде*",
        }
    }
}

/// Normalized outage description for one group on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    text: String,
    minutes: u32,
}

impl GroupRecord {
    /// Build a record from already-normalized text. The duration is always
    /// derived from the text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let minutes = outage_minutes(&text);
        Self { text, minutes }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

/// The extracted schedule for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub groups: BTreeMap<Group, GroupRecord>,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            groups: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, group: Group, text: impl Into<String>) -> Self {
        self.groups.insert(group, GroupRecord::from_text(text));
        self
    }

    pub fn group(&self, group: Group) -> Option<&GroupRecord> {
        self.groups.get(&group)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_follow_text() {
        let g = GroupRecord::from_text("Електроенергії немає з 08:00 до 11:30");
        assert_eq!(g.minutes(), 210);

        let g = GroupRecord::from_text("буде!!!!");
        assert_eq!(g.minutes(), 0);
    }

    #[test]
    fn day_serializes_with_source_labels() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let day = DayRecord::new(date).with_group(Group::Power, "Електроенергії немає з 10:00 до 12:00");

        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2025-03-01");
        assert_eq!(json["groups"]["Група 6.1"]["minutes"], 120);
        assert_eq!(
            json["groups"]["Група 6.1"]["text"],
            "Електроенергії немає з 10:00 до 12:00"
        );
    }

    #[test]
    fn tracked_order_is_power_then_water() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let day = DayRecord::new(date)
            .with_group(Group::Water, "a")
            .with_group(Group::Power, "b");
        let keys: Vec<_> = day.groups.keys().copied().collect();
        assert_eq!(keys, Group::TRACKED.to_vec());
    }
}
