// fetcher.rs
use crate::config::FetchConfig;
use crate::fetch::{ContentFetcher, FetchError};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use scraper::Html;
use url::Url;

pub struct PageFetcher {
    client: Client,
}

/// Visible text of an HTML document: script and style bodies dropped,
/// whitespace collapsed to single spaces.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut pieces = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .map(|e| matches!(e.name(), "script" | "style"))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        pieces.extend(text.split_whitespace());
    }

    pieces.join(" ")
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let resp = self
            .client
            .get(parsed)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::Blocked(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(page_text(&html))
    }
}

impl ContentFetcher for PageFetcher {
    fn fetch(&self, url: &str) -> String {
        match self.fetch_text(url) {
            Ok(text) => {
                tracing::info!(url, chars = text.len(), "Fetched page");
                text
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Could not fetch page");
                String::new()
            }
        }
    }
}
