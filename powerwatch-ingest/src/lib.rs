//! powerwatch-ingest: content providers for the outage schedule (local
//! fixture or the provider's menus API) and the API envelope decoder.

pub mod envelope;
pub mod error;
pub mod provider;

pub use envelope::{MenuContent, raw_html_from_menus};
pub use error::FetchError;
pub use provider::{ContentProvider, FixtureProvider, MENUS_URL, MenuApiProvider};
