//! PokeAPI Client
//!
//! Fetch-or-cache access to PokeAPI resources. Raw response bodies are cached
//! under their full request URL; decoding happens after the cache, so a hit
//! never touches the network.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

// == PokeAPI Client ==
/// PokeAPI client sharing a [`TtlCache`] for response bodies.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    api_url: String,
    cache: Arc<TtlCache>,
}

impl PokeApiClient {
    // == Constructor ==
    /// Builds a client for `config.api_url` with the configured request timeout.
    pub fn new(config: &Config, cache: Arc<TtlCache>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    // == URLs ==
    /// First page of the location area listing.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.api_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.api_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.api_url, name)
    }

    // == Fetch ==
    /// Returns the body at `url`, from the cache when possible.
    ///
    /// Only successful (< 300) bodies are cached. Two concurrent misses on the
    /// same URL may both reach the network; the later write wins.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url) {
            debug!(url = %url, "Serving response from cache");
            return Ok(body);
        }

        info!(url = %url, "Fetching from PokeAPI");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.as_u16() > 299 {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        self.cache.add(url, body.clone());
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Resources ==
    /// Fetches one page of location areas; `url` is the first-page URL or a
    /// `next`/`previous` link from an earlier page.
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        self.fetch_json(url).await
    }

    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        self.fetch_json(&self.pokemon_url(name)).await
    }
}
