//! powerwatch-core: schedule extraction, change detection and message
//! formatting for the outage watcher. No I/O happens here.

pub mod diff;
pub mod extract;
pub mod message;
pub mod model;
pub mod scan;
pub mod state;
pub mod time;

pub use diff::{DayChange, classify, compare_days};
pub use extract::{NO_OUTAGE, OutageWindow, ParseError, extract, normalize, outage_minutes};
pub use message::{NO_DATA, format_message, title};
pub use model::{DayRecord, Group, GroupRecord};
pub use scan::Scanner;
pub use state::{PersistedState, prune};
pub use time::{DEFAULT_TIMEZONE, parse_timezone, reference_dates, section_date, short_date};
