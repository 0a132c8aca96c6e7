//! India Location Hub API client
//!
//! HTTP client for the administrative directory. District and taluka
//! listings are returned unfiltered; see `resolver::tier::retain_children`.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::*;
use crate::config::ResolverConfig;
use crate::error::{LocationError, Result};
use crate::model::AdministrativeEntity;
use crate::sources::traits::DirectoryService;
use crate::sources::{build_http_client, truncate_body};

pub struct LocationHubClient {
    http: Client,
    base_url: String,
}

impl LocationHubClient {
    pub fn new(config: &ResolverConfig) -> anyhow::Result<Self> {
        Ok(Self {
            http: build_http_client(config.request_timeout)?,
            base_url: config.directory_base_url.clone(),
        })
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| {
            LocationError::Network(format!("Invalid location hub URL for {}: {}", path, e))
        })
    }

    /// GET a listing and unwrap the `{success, data}` envelope.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "location hub request");

        let response = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LocationError::Network(format!("Failed to fetch {}: {}", url.path(), e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LocationError::Network(format!(
                "Location hub API error {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        let envelope: HubResponse<T> = response.json().await.map_err(|e| {
            LocationError::Network(format!(
                "Failed to parse response from {}: {}",
                url.path(),
                e
            ))
        })?;

        match envelope {
            HubResponse {
                success: true,
                data: Some(data),
            } => Ok(data),
            _ => Err(LocationError::Network(format!(
                "Location hub reported failure for {}",
                url.path()
            ))),
        }
    }
}

#[async_trait]
impl DirectoryService for LocationHubClient {
    async fn states(&self) -> Result<Vec<AdministrativeEntity>> {
        let url = self.url("/locations/states", &[])?;
        let data: StatesData = self.get(url).await?;
        Ok(data.states.into_iter().map(HubEntity::into_entity).collect())
    }

    async fn districts(&self, state_code: &str) -> Result<Vec<AdministrativeEntity>> {
        let url = self.url("/locations/districts", &[("state_code", state_code)])?;
        let data: DistrictsData = self.get(url).await?;
        Ok(data
            .districts
            .into_iter()
            .map(HubEntity::into_district)
            .collect())
    }

    async fn talukas(&self, district_code: &str) -> Result<Vec<AdministrativeEntity>> {
        let url = self.url("/locations/talukas", &[("district_code", district_code)])?;
        let data: TalukasData = self.get(url).await?;
        Ok(data.talukas.into_iter().map(HubEntity::into_taluka).collect())
    }

    async fn villages(
        &self,
        state: &str,
        district: &str,
        taluka: &str,
    ) -> Result<Vec<AdministrativeEntity>> {
        let url = self.url(
            "/locations/villages",
            &[("state", state), ("district", district), ("taluka", taluka)],
        )?;
        let data: VillagesData = self.get(url).await?;
        Ok(data.villages.into_iter().map(HubEntity::into_entity).collect())
    }
}
