//! Response shapes for the Places endpoints.

use serde::Deserialize;

/// Envelope shared by the Places web-service endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusEnvelope {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceContact>,
}

/// One text-search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    /// Category tags, e.g. `car_repair`, `point_of_interest`.
    #[serde(default)]
    pub types: Vec<String>,
}

impl PlaceResult {
    #[must_use]
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().map(|g| g.location)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Contact fields requested from Place Details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceContact {
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
}

impl PlaceContact {
    /// Prefer the international form; it already carries the country code.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.international_phone_number
            .as_deref()
            .or(self.formatted_phone_number.as_deref())
            .filter(|p| !p.trim().is_empty())
    }
}
