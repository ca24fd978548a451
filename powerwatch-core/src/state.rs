//! Last-known schedules and their retention window.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::DayRecord;
use crate::time::previous_day;

/// Durable record of what has already been announced, one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub days: Vec<DayRecord>,
}

// Older state files wrote `"days": null` once everything had been pruned.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<DayRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DayRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PersistedState {
    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Replace the record for `day.date`, or append it.
    pub fn upsert(&mut self, day: DayRecord) {
        match self.days.iter_mut().find(|d| d.date == day.date) {
            Some(slot) => *slot = day,
            None => self.days.push(day),
        }
    }

    /// Keep only days equal to a reference date or the day before one.
    pub fn prune(&mut self, reference_dates: &[NaiveDate]) {
        let keep: Vec<NaiveDate> = reference_dates
            .iter()
            .flat_map(|&d| [d, previous_day(d)])
            .collect();
        self.days.retain(|d| keep.contains(&d.date));
    }
}

/// Owned variant of [`PersistedState::prune`].
pub fn prune(mut state: PersistedState, reference_dates: &[NaiveDate]) -> PersistedState {
    state.prune(reference_dates);
    state
}
