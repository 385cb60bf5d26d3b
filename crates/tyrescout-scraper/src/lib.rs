//! Website access for the enhance stage.
//!
//! [`HttpPageFetcher`] downloads a business homepage and [`html_to_text`]
//! reduces it to the visible text the field extractor scans. [`Throttle`]
//! spaces out consecutive outbound calls.

pub mod error;
pub mod fetch;
pub mod text;
pub mod throttle;

pub use error::FetchError;
pub use fetch::HttpPageFetcher;
pub use text::html_to_text;
pub use throttle::Throttle;
