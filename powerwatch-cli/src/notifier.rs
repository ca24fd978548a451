//! Message delivery through the Telegram Bot API.

use async_trait::async_trait;
use thiserror::Error;

/// Telegram error bodies are short; anything longer is cut here.
const MAX_ERROR_BODY: usize = 1024;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("telegram status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Something that can post a formatted message to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

pub struct TelegramNotifier {
    api_base: String,
    token: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(api_base, token, reqwest::Client::new())
    }

    pub fn with_client(
        api_base: impl Into<String>,
        token: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            token: token.into(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let resp = self
            .client
            .post(self.endpoint())
            .form(&[("chat_id", chat_id), ("text", text), ("parse_mode", "Markdown")])
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY).to_string(),
            });
        }
        Ok(())
    }
}

/// Longest prefix of `s` within `max` bytes that ends on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Mock};

    fn notifier(base: &str) -> TelegramNotifier {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        TelegramNotifier::with_client(base, "123:abc", client)
    }

    #[test]
    fn endpoint_includes_token() {
        let n = TelegramNotifier::new("https://api.telegram.org/", "123:abc");
        assert_eq!(n.endpoint(), "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[tokio::test]
    async fn posts_url_encoded_form() {
        let mut server = mockito::Server::new_async().await;
        let mock: Mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("chat_id".to_string(), "-100200".to_string()),
                Matcher::UrlEncoded("text".to_string(), "*графік на 01.03*".to_string()),
                Matcher::UrlEncoded("parse_mode".to_string(), "Markdown".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let result = notifier(&server.url()).send("-100200", "*графік на 01.03*").await;

        assert!(result.is_ok(), "{result:?}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_200_is_a_delivery_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(400)
            .with_body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let err = notifier(&server.url()).send("1", "hi").await.unwrap_err();
        mock.assert_async().await;
        match err {
            DeliveryError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("chat not found"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn long_error_body_is_truncated() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(502)
            .with_body("ж".repeat(2000))
            .create_async()
            .await;

        match notifier(&server.url()).send("1", "hi").await {
            Err(DeliveryError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), MAX_ERROR_BODY);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("жжж", 3), "ж");
    }
}
