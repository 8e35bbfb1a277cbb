// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Text search with pagination and per-place detail lookups

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::PlaceRecord;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fields requested from Place Details
/// The Places API has no email field; `email` is still read when a compatible provider returns it
const DETAIL_FIELDS: &str = "place_id,name,formatted_address,website";

/// Places search surface used by the collector
/// DOCUMENTATION: Implemented by GooglePlacesClient; tests substitute a simulated API
#[allow(async_fn_in_trait)]
pub trait PlacesApi {
    /// Run a text search, or fetch the next page when `page_token` is given
    async fn text_search(
        &self,
        query: &str,
        location: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, PlacesError>;

    /// Look up one place by id; `Ok(None)` when the API has no result for it
    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError>;
}

/// Google Places API client
/// DOCUMENTATION: Constructed once from the credential and passed to the collector
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Maps API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
}

/// One page of text search results
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchPage {
    /// Result summaries, in API order
    #[serde(default)]
    pub results: Vec<GooglePlace>,
    /// Continuation token (present only when more results exist)
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Raw text search response
#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<GooglePlace>,
    status: String,
    next_page_token: Option<String>,
    error_message: Option<String>,
}

/// Raw place details response
#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<PlaceDetails>,
    status: String,
    error_message: Option<String>,
}

/// Place summary from a text search
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlace {
    /// Google's unique place identifier
    pub place_id: String,
    /// Place name
    #[serde(default)]
    pub name: Option<String>,
    /// Formatted address
    #[serde(default)]
    pub formatted_address: Option<String>,
    /// Website URL (rarely present in search summaries)
    #[serde(default)]
    pub website: Option<String>,
}

/// Enriched fields from Place Details
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    /// DOCUMENTATION: Initializes client with API key, base URL and request timeout
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PlacesError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        Self::new(
            config.google_maps_api_key.clone(),
            config.places_api_base_url.clone(),
            config.request_timeout(),
        )
    }

    /// Issue a GET against the Places API and decode the JSON body
    /// DOCUMENTATION: Network failures, non-2xx statuses and bad bodies all become ExternalApiError
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google Places API request failed: {}", e);
                PlacesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google Places API error {}: {}", status, body);
            return Err(PlacesError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            log::error!("Failed to parse Google Places response: {}", e);
            PlacesError::ExternalApiError(format!("Parse error: {}", e))
        })
    }
}

/// Map a non-OK API status to an error
/// DOCUMENTATION: Shared by text search and details; callers handle their own "empty" statuses first
fn status_error(status: &str, error_message: Option<String>) -> PlacesError {
    match status {
        "OVER_QUERY_LIMIT" => {
            log::error!("Google Places API quota exceeded");
            PlacesError::RateLimitExceeded
        }
        "REQUEST_DENIED" | "INVALID_REQUEST" => {
            let msg = error_message.unwrap_or_else(|| format!("Request rejected: {}", status));
            log::error!("Google Places API request denied: {}", msg);
            PlacesError::ExternalApiError(msg)
        }
        other => {
            let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google Places API unexpected status: {}", msg);
            PlacesError::ExternalApiError(msg)
        }
    }
}

impl PlacesApi for GooglePlacesClient {
    /// Text search for "<query> in <location>"
    /// DOCUMENTATION: The API's `location` parameter only takes coordinates, so the free-text
    /// location is folded into the query string
    async fn text_search(
        &self,
        query: &str,
        location: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, PlacesError> {
        let full_query = format!("{} in {}", query, location);
        let mut params = vec![("query", full_query.as_str())];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        log::debug!(
            "Google Places text search: query='{}', page_token={}",
            full_query,
            page_token.is_some()
        );

        let response: TextSearchResponse = self.get_json("textsearch/json", &params).await?;

        match response.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                log::info!(
                    "Google Places search returned {} results",
                    response.results.len()
                );
                Ok(SearchPage {
                    results: response.results,
                    next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
                })
            }
            other => Err(status_error(other, response.error_message)),
        }
    }

    /// Get contact details for a specific place
    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        let params = [("place_id", place_id), ("fields", DETAIL_FIELDS)];

        log::debug!("Google Places details lookup: place_id={}", place_id);

        let response: DetailsResponse = self.get_json("details/json", &params).await?;

        match response.status.as_str() {
            "OK" => Ok(response.result),
            "NOT_FOUND" | "ZERO_RESULTS" => {
                log::warn!("No details available for place_id={}", place_id);
                Ok(None)
            }
            other => Err(status_error(other, response.error_message)),
        }
    }
}

/// Convert a search summary plus optional details into a record
/// DOCUMENTATION: Detail email and website win over summary values when present;
/// without a detail result the summary website is kept and email stays empty
pub fn to_place_record(place: &GooglePlace, details: Option<&PlaceDetails>) -> PlaceRecord {
    let mut website = place.website.clone().unwrap_or_default();
    let mut email = String::new();

    if let Some(details) = details {
        if let Some(detail_email) = details.email.as_ref().filter(|e| !e.is_empty()) {
            email = detail_email.clone();
        }
        if let Some(detail_website) = details.website.as_ref().filter(|w| !w.is_empty()) {
            website = detail_website.clone();
        }
    }

    PlaceRecord {
        name: place.name.clone(),
        address: place.formatted_address.clone(),
        email,
        website,
    }
}
