//! Plain HTTP fetch of a business homepage.

use std::time::Duration;

use reqwest::{header, Client, Url};

use crate::error::FetchError;
use crate::text::html_to_text;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Fetches pages with a fixed user agent and request timeout.
///
/// No retries: a failed page is logged by the caller and the record is left
/// as collected.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the raw body.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] unless `url` is an absolute http(s) URL.
    /// - [`FetchError::UnexpectedStatus`] on a non-2xx response.
    /// - [`FetchError::Http`] on network failure or an unreadable body.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed = parse_page_url(url)?;
        let response = self
            .client
            .get(parsed)
            .header(header::ACCEPT, ACCEPT_HTML)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }

    /// GET `url` and reduce the body to visible text.
    ///
    /// # Errors
    ///
    /// Same as [`HttpPageFetcher::fetch_html`].
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let html = self.fetch_html(url).await?;
        let text = html_to_text(&html);
        tracing::debug!(url, chars = text.len(), "fetched page text");
        Ok(text)
    }
}

fn parse_page_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
