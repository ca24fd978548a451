//! Where the schedule page comes from: a local fixture or the live menus API.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

use crate::envelope::raw_html_from_menus;
use crate::error::FetchError;

/// Live endpoint serving the outage schedule menus.
pub const MENUS_URL: &str = "https://api.loe.lviv.ua/api/menus?page=1&type=photo-grafic";

/// A source of raw schedule content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetch the raw schedule text.
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Human-readable origin, for logs.
    fn source(&self) -> String;
}

/// Reads the whole schedule page from a file.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentProvider for FixtureProvider {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!(path = %self.path.display(), "reading from test file");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Fixture {
                path: self.path.clone(),
                source,
            })
    }

    fn source(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Fetches the menus envelope over HTTP and unwraps the schedule HTML.
#[derive(Debug, Clone)]
pub struct MenuApiProvider {
    url: String,
    client: reqwest::Client,
}

impl MenuApiProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl ContentProvider for MenuApiProvider {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "fetching from URL");
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        debug!(bytes = body.len(), "received response from API");

        match raw_html_from_menus(&body) {
            Ok(content) => {
                debug!(
                    item = content.item_name.as_deref().unwrap_or(""),
                    bytes = content.raw_html.len(),
                    "extracted rawHtml from menu item"
                );
                Ok(content.raw_html)
            }
            Err(e) => {
                let head = &body[..body.len().min(500)];
                debug!(preview = %String::from_utf8_lossy(head), "unusable API response");
                Err(e)
            }
        }
    }

    fn source(&self) -> String {
        self.url.clone()
    }
}
