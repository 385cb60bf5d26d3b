//! HTTP client for the Places web-service API (Text Search, Place Details).
//!
//! Every response carries a `status` field. `OK` and `ZERO_RESULTS` are
//! success; anything else surfaces as [`GoogleError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::GoogleError;
use crate::retry::RetryPolicy;
use crate::types::{self, PlaceContact, PlaceResult};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const DETAILS_FIELDS: &str = "website,formatted_phone_number,international_phone_number";

/// Client for the Places API.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    retry: RetryPolicy,
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GoogleError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GoogleError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GoogleError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GoogleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Trailing slash so `join("textsearch/json")` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| GoogleError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            retry: RetryPolicy {
                max_retries: 0,
                backoff_base_ms: 0,
            },
        })
    }

    /// Enables retries on transient failures (see [`crate::retry`]).
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy {
            max_retries,
            backoff_base_ms,
        };
        self
    }

    /// Runs a Text Search for `query`, biased toward `region` (ccTLD).
    ///
    /// Returns an empty `Vec` on `ZERO_RESULTS`. Only the first result page is
    /// requested.
    ///
    /// # Errors
    ///
    /// - [`GoogleError::Api`] if the envelope status is not `OK`/`ZERO_RESULTS`.
    /// - [`GoogleError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`GoogleError::Http`] on network failure.
    /// - [`GoogleError::Deserialize`] if the body does not match the expected shape.
    pub async fn text_search(
        &self,
        query: &str,
        region: &str,
    ) -> Result<Vec<PlaceResult>, GoogleError> {
        let url = self.build_url("textsearch/json", &[("query", query), ("region", region)])?;
        let response: types::TextSearchResponse = self.get_checked(&url, "textsearch").await?;
        tracing::debug!(
            query,
            count = response.results.len(),
            "text search complete"
        );
        Ok(response.results)
    }

    /// Fetches website and phone fields for one place.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::text_search`].
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceContact, GoogleError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;
        let response: types::DetailsResponse = self.get_checked(&url, "details").await?;
        Ok(response.result.unwrap_or_default())
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, GoogleError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|_| GoogleError::InvalidBaseUrl(self.base_url.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// GET `url`, check HTTP and envelope status, decode into `T`.
    async fn get_checked<T: DeserializeOwned>(
        &self,
        url: &Url,
        endpoint: &str,
    ) -> Result<T, GoogleError> {
        self.retry
            .run(endpoint, || async move {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(GoogleError::http)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(GoogleError::UnexpectedStatus {
                        status: status.as_u16(),
                        endpoint: endpoint.to_owned(),
                    });
                }

                let body = response.text().await.map_err(GoogleError::http)?;
                let value: serde_json::Value =
                    serde_json::from_str(&body).map_err(|e| GoogleError::Deserialize {
                        context: endpoint.to_owned(),
                        source: e,
                    })?;
                check_status(&value, endpoint)?;

                serde_json::from_value(value).map_err(|e| GoogleError::Deserialize {
                    context: endpoint.to_owned(),
                    source: e,
                })
            })
            .await
    }
}

fn check_status(body: &serde_json::Value, endpoint: &str) -> Result<(), GoogleError> {
    let envelope: types::StatusEnvelope =
        serde_json::from_value(body.clone()).map_err(|e| GoogleError::Deserialize {
            context: format!("{endpoint} status"),
            source: e,
        })?;

    match envelope.status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(GoogleError::Api {
            endpoint: endpoint.to_owned(),
            status: other.to_owned(),
            message: envelope.error_message.unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PlacesClient {
        PlacesClient::with_base_url(
            "k3y",
            5,
            "tyrescout-test/0.1",
            "http://localhost:9/maps/api/place",
        )
        .unwrap()
    }

    #[test]
    fn build_url_appends_endpoint_and_key() {
        let url = client()
            .build_url("textsearch/json", &[("query", "tractor tyre repair Paarl")])
            .unwrap();
        assert_eq!(url.path(), "/maps/api/place/textsearch/json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("query".into(), "tractor tyre repair Paarl".into())));
        assert!(pairs.contains(&("key".into(), "k3y".into())));
    }

    #[test]
    fn check_status_accepts_zero_results() {
        let body = serde_json::json!({"status": "ZERO_RESULTS", "results": []});
        assert!(check_status(&body, "textsearch").is_ok());
    }

    #[test]
    fn check_status_surfaces_error_message() {
        let body = serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        });
        let err = check_status(&body, "textsearch").unwrap_err();
        assert!(
            matches!(err, GoogleError::Api { ref status, ref message, .. }
                if status == "REQUEST_DENIED" && message.contains("invalid")),
            "got: {err:?}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = PlacesClient::with_base_url("k", 5, "ua", "not a url");
        assert!(matches!(result, Err(GoogleError::InvalidBaseUrl(_))));
    }
}
