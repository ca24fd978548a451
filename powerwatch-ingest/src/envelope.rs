//! Decoder for the provider's menus API envelope.
//!
//! The endpoint returns a Hydra collection:
//!   {"hydra:member": [{"menuItems": [{"name": "...", "rawHtml": "..."}]}]}
//! The first non-empty `rawHtml` holds the schedule page.

use serde::Deserialize;

use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct MenusResponse {
    #[serde(rename = "hydra:member", default)]
    members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
struct Member {
    #[serde(rename = "menuItems", default)]
    menu_items: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
struct MenuItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "rawHtml", default)]
    raw_html: Option<String>,
}

/// Schedule HTML pulled out of the envelope, with the menu item it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuContent {
    pub item_name: Option<String>,
    pub raw_html: String,
}

/// Pull the first non-empty `rawHtml` out of a menus response body.
pub fn raw_html_from_menus(body: &[u8]) -> Result<MenuContent, FetchError> {
    let response: MenusResponse = serde_json::from_slice(body)?;

    response
        .members
        .into_iter()
        .flat_map(|m| m.menu_items)
        .find_map(|item| match item.raw_html {
            Some(html) if !html.is_empty() => Some(MenuContent {
                item_name: item.name,
                raw_html: html,
            }),
            _ => None,
        })
        .ok_or(FetchError::NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_non_empty_raw_html() {
        let body = br#"{
            "hydra:member": [
                {"menuItems": [{"name": "empty", "rawHtml": ""}, {"name": "no html"}]},
                {"menuItems": [
                    {"name": "Today", "rawHtml": "<p>first</p>"},
                    {"name": "Later", "rawHtml": "<p>second</p>"}
                ]}
            ]
        }"#;

        let content = raw_html_from_menus(body).unwrap();
        assert_eq!(content.raw_html, "<p>first</p>");
        assert_eq!(content.item_name.as_deref(), Some("Today"));
    }

    #[test]
    fn null_raw_html_is_skipped() {
        let body = br#"{"hydra:member": [{"menuItems": [{"name": "a", "rawHtml": null}, {"rawHtml": "x"}]}]}"#;
        let content = raw_html_from_menus(body).unwrap();
        assert_eq!(content.raw_html, "x");
        assert!(content.item_name.is_none());
    }

    #[test]
    fn envelope_without_html_is_an_error() {
        let body = br#"{"hydra:member": [{"menuItems": []}]}"#;
        assert!(matches!(raw_html_from_menus(body), Err(FetchError::NoContent)));

        let body = br#"{"@context": "/api/contexts/Menu"}"#;
        assert!(matches!(raw_html_from_menus(body), Err(FetchError::NoContent)));
    }

    #[test]
    fn non_json_is_a_decode_error() {
        let body = b"<html>maintenance</html>";
        assert!(matches!(raw_html_from_menus(body), Err(FetchError::Decode(_))));
    }
}
