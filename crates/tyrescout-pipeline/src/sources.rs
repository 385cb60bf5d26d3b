//! Contracts for the external collaborators and their HTTP adapters.
//!
//! The pipeline only sees these traits. Tests drive it with in-memory fakes;
//! the binary plugs in [`PlacesClient`] and [`HttpPageFetcher`].

use std::fmt::Display;
use std::future::Future;

use tyrescout_core::{BusinessRecord, Location};
use tyrescout_google::{GoogleError, PlaceContact, PlaceResult, PlacesClient};
use tyrescout_scraper::{FetchError, HttpPageFetcher};

/// One places-search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub external_id: String,
    pub name: String,
    pub address: String,
    pub location: Location,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub types: Vec<String>,
}

impl SearchHit {
    /// Starts a record from this hit with every researched field unknown.
    /// The identifier is trimmed so it matches the deduplication key.
    #[must_use]
    pub fn into_record(self, search_term: &str, area: &str) -> BusinessRecord {
        BusinessRecord {
            address: self.address,
            location: self.location,
            rating: self.rating,
            rating_count: self.rating_count,
            types: self.types,
            source_search_term: search_term.to_owned(),
            source_area: area.to_owned(),
            ..BusinessRecord::new(self.external_id.trim(), self.name)
        }
    }
}

impl From<PlaceResult> for SearchHit {
    fn from(place: PlaceResult) -> Self {
        let location = place
            .location()
            .map(|l| Location {
                lat: l.lat,
                lng: l.lng,
            })
            .unwrap_or_default();
        Self {
            external_id: place.place_id,
            name: place.name,
            address: place.formatted_address,
            location,
            rating: place.rating,
            rating_count: place.user_ratings_total,
            types: place.types,
        }
    }
}

/// Contact fields from a details lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub website: Option<String>,
    pub phone: Option<String>,
}

impl From<PlaceContact> for ContactDetails {
    fn from(contact: PlaceContact) -> Self {
        Self {
            phone: contact.phone().map(str::to_owned),
            website: contact.website.filter(|w| !w.trim().is_empty()),
        }
    }
}

pub trait PlacesSearch {
    type Error: Display;

    /// Hits for `query`, biased toward `region`. An empty `Vec` is a valid
    /// answer.
    fn search(
        &self,
        query: &str,
        region: &str,
    ) -> impl Future<Output = Result<Vec<SearchHit>, Self::Error>> + Send;

    fn details(
        &self,
        external_id: &str,
    ) -> impl Future<Output = Result<ContactDetails, Self::Error>> + Send;
}

pub trait PageSource {
    type Error: Display;

    /// Visible text of the page at `url`.
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

pub trait SpreadsheetExport {
    type Error: Display;

    /// Pushes `records` and returns the document identifier.
    fn export(
        &self,
        records: &[BusinessRecord],
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl PlacesSearch for PlacesClient {
    type Error = GoogleError;

    async fn search(&self, query: &str, region: &str) -> Result<Vec<SearchHit>, GoogleError> {
        let results = self.text_search(query, region).await?;
        Ok(results.into_iter().map(SearchHit::from).collect())
    }

    async fn details(&self, external_id: &str) -> Result<ContactDetails, GoogleError> {
        Ok(self.place_details(external_id).await?.into())
    }
}

impl PageSource for HttpPageFetcher {
    type Error = FetchError;

    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        HttpPageFetcher::fetch_text(self, url).await
    }
}
