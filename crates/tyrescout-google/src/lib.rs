//! HTTP clients for the Google APIs the pipeline talks to.
//!
//! [`PlacesClient`] wraps the legacy Places Text Search and Place Details
//! endpoints. [`SheetsClient`] creates a spreadsheet and writes a block of
//! rows through the Sheets v4 REST API.

pub mod error;
pub mod places;
pub mod sheets;
pub mod types;

mod retry;

pub use error::GoogleError;
pub use places::PlacesClient;
pub use sheets::SheetsClient;
pub use types::{LatLng, PlaceContact, PlaceResult};
