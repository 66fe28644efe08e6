//! PokeAPI Client
//!
//! Read-through HTTP client that consults the expiring cache before every
//! request.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::ExpiringCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreaDetail, LocationAreaPage, Pokemon};

/// HTTP client for the PokeAPI, fronted by a shared response cache.
///
/// Responses are cached keyed by their full request URL.
#[derive(Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<ExpiringCache>,
}

impl PokeApiClient {
    /// Creates a client for `config.api_base_url` using the given cache.
    pub fn new(config: &Config, cache: Arc<ExpiringCache>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// The response cache backing this client.
    pub fn cache(&self) -> &ExpiringCache {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    /// Returns the body at `url`, from the cache when present.
    ///
    /// On a miss the body is fetched and cached, unless the server answers
    /// with a non-success status.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(body) = self.cache.get(url) {
            return Ok(body);
        }

        let body = self.fetch_uncached(url).await?;
        self.cache.add(url, body.clone());
        Ok(body)
    }

    /// Fetches a page of location areas. `None` requests the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        match page_url {
            Some(url) => self.get_json(url).await,
            None => self.get_json(&self.location_areas_url()).await,
        }
    }

    /// Fetches one location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationAreaDetail> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get_json(&url).await
    }

    /// Fetches one Pokemon by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.get_json(&url).await
    }

    /// Decodes the body at `url`, caching fresh bodies only once they decode.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(body) = self.cache.get(url) {
            return Ok(serde_json::from_slice(&body)?);
        }

        let body = self.fetch_uncached(url).await?;
        let decoded = serde_json::from_slice(&body)?;
        self.cache.add(url, body);
        Ok(decoded)
    }

    async fn fetch_uncached(&self, url: &str) -> Result<Vec<u8>> {
        info!("Fetching {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
