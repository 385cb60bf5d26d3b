//! Minimal Sheets v4 client: create a spreadsheet, overwrite a range.
//!
//! Authentication is a caller-supplied OAuth bearer token; acquiring and
//! refreshing it is out of scope.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use crate::error::GoogleError;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    spreadsheet_id: String,
}

pub struct SheetsClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl SheetsClient {
    /// # Errors
    ///
    /// Returns [`GoogleError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(access_token: &str, timeout_secs: u64) -> Result<Self, GoogleError> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`GoogleError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GoogleError::InvalidBaseUrl`] if `base_url` is not a usable base.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GoogleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| GoogleError::InvalidBaseUrl(base_url.to_owned()))?;
        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Creates a spreadsheet with a single tab named `sheet_title` and returns
    /// its `spreadsheetId`.
    ///
    /// # Errors
    ///
    /// - [`GoogleError::UnexpectedStatus`] on a non-2xx response (e.g. 401 for
    ///   an expired token).
    /// - [`GoogleError::Http`] on network failure.
    /// - [`GoogleError::Deserialize`] if the response lacks `spreadsheetId`.
    pub async fn create_spreadsheet(
        &self,
        title: &str,
        sheet_title: &str,
    ) -> Result<String, GoogleError> {
        let url = self.endpoint(&["v4", "spreadsheets"])?;
        let body = json!({
            "properties": { "title": title },
            "sheets": [{ "properties": { "title": sheet_title } }]
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        let text = Self::success_body(response, "spreadsheets.create").await?;
        let created: CreateResponse =
            serde_json::from_str(&text).map_err(|e| GoogleError::Deserialize {
                context: "spreadsheets.create".to_owned(),
                source: e,
            })?;
        Ok(created.spreadsheet_id)
    }

    /// Overwrites `range` (A1 notation, e.g. `Companies!A1`) with `rows`.
    ///
    /// # Errors
    ///
    /// Same as [`SheetsClient::create_spreadsheet`].
    pub async fn write_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<(), GoogleError> {
        let mut url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id, "values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": rows,
        });

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        Self::success_body(response, "values.update").await?;
        tracing::debug!(spreadsheet_id, rows = rows.len(), "wrote rows to sheet");
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GoogleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GoogleError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn success_body(
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<String, GoogleError> {
        let status = response.status();
        if !status.is_success() {
            return Err(GoogleError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}
