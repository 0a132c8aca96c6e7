//! External location sources
//!
//! - `location_hub`: the administrative directory (states, districts, talukas, villages)
//! - `postal_pincode`: pincode to post office lookup

pub mod location_hub;
pub mod postal_pincode;
pub mod traits;

pub use location_hub::LocationHubClient;
pub use postal_pincode::PostalPincodeClient;
pub use traits::{DirectoryService, PostalLookupService};

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Shared reqwest client setup for both sources.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to create HTTP client")
}

/// First 200 characters of an error body, for log-friendly messages.
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(200).collect()
}
