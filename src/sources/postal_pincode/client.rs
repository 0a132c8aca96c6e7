//! Postal Pincode API client

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::types::PincodeRecord;
use crate::config::ResolverConfig;
use crate::error::{LocationError, Result};
use crate::sources::traits::PostalLookupService;
use crate::sources::{build_http_client, truncate_body};

pub struct PostalPincodeClient {
    http: Client,
    base_url: String,
}

impl PostalPincodeClient {
    pub fn new(config: &ResolverConfig) -> anyhow::Result<Self> {
        Ok(Self {
            http: build_http_client(config.request_timeout)?,
            base_url: config.postal_base_url.clone(),
        })
    }

    /// `{base}/pincode/{pincode}` with the pincode escaped as a single path segment.
    fn url(&self, pincode: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            LocationError::Network(format!("Invalid postal URL {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                LocationError::Network(format!("Postal URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .push("pincode")
            .push(pincode);
        Ok(url)
    }
}

#[async_trait]
impl PostalLookupService for PostalPincodeClient {
    async fn lookup(&self, pincode: &str) -> Result<PincodeRecord> {
        let url = self.url(pincode)?;
        debug!(%url, "postal lookup request");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LocationError::Network(format!(
                "Postal API error {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        let records: Vec<PincodeRecord> = response.json().await.map_err(|e| {
            LocationError::Network(format!("Failed to parse postal response: {}", e))
        })?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| LocationError::NotFound(format!("no record for pincode {}", pincode)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PostalPincodeClient {
        let config = ResolverConfig::default().with_postal_url(base).unwrap();
        PostalPincodeClient::new(&config).unwrap()
    }

    #[test]
    fn test_pincode_stays_in_one_segment() {
        let client = client("http://localhost:8080");
        assert_eq!(client.url("411038").unwrap().path(), "/pincode/411038");

        let url = client.url("../x/1").unwrap();
        assert_eq!(url.path(), "/pincode/..%2Fx%2F1");
        assert_eq!(url.host_str(), Some("localhost"));

        let url = client.url("1?q=#x").unwrap();
        assert_eq!(url.path(), "/pincode/1%3Fq=%23x");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = client("http://localhost:8080/postal/");
        assert_eq!(client.url("400001").unwrap().path(), "/postal/pincode/400001");
    }
}
