// src/services/test_support.rs
// DOCUMENTATION: In-memory PlacesApi for collector and pipeline tests
// PURPOSE: Serve scripted pages, count calls, inject failures

use crate::errors::PlacesError;
use crate::services::{GooglePlace, PlaceDetails, PlacesApi, SearchPage};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Scripted places API
/// Page N (zero based) links to page N+1 with token "page-{N+1}" while more pages exist
#[derive(Default)]
pub struct SimulatedApi {
    pages: Vec<Vec<GooglePlace>>,
    details: HashMap<String, PlaceDetails>,
    fail_search_on_page: Option<usize>,
    fail_details_for: Option<String>,
    pub search_calls: Cell<usize>,
    pub detail_calls: Cell<usize>,
    pub tokens_seen: RefCell<Vec<Option<String>>>,
}

impl SimulatedApi {
    /// `page_sizes[i]` places on page i, ids "p{i}-{j}"
    pub fn with_pages(page_sizes: &[usize]) -> Self {
        let pages = page_sizes
            .iter()
            .enumerate()
            .map(|(i, size)| {
                (0..*size)
                    .map(|j| GooglePlace {
                        place_id: format!("p{}-{}", i, j),
                        name: Some(format!("Place {}-{}", i, j)),
                        formatted_address: Some(format!("{} Main St", i * 100 + j)),
                        website: None,
                    })
                    .collect()
            })
            .collect();

        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn with_page(places: Vec<GooglePlace>) -> Self {
        Self {
            pages: vec![places],
            ..Default::default()
        }
    }

    pub fn detail(mut self, place_id: &str, details: PlaceDetails) -> Self {
        self.details.insert(place_id.to_string(), details);
        self
    }

    pub fn fail_search_on_page(mut self, page: usize) -> Self {
        self.fail_search_on_page = Some(page);
        self
    }

    pub fn fail_details_for(mut self, place_id: &str) -> Self {
        self.fail_details_for = Some(place_id.to_string());
        self
    }

    pub fn total_calls(&self) -> usize {
        self.search_calls.get() + self.detail_calls.get()
    }
}

impl PlacesApi for SimulatedApi {
    async fn text_search(
        &self,
        _query: &str,
        _location: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, PlacesError> {
        self.search_calls.set(self.search_calls.get() + 1);
        self.tokens_seen
            .borrow_mut()
            .push(page_token.map(str::to_string));

        let index = match page_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse().ok())
                .ok_or_else(|| PlacesError::ExternalApiError(format!("bad token {}", token)))?,
        };

        if self.fail_search_on_page == Some(index) {
            return Err(PlacesError::ExternalApiError("connection reset".to_string()));
        }

        let results = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(SearchPage {
            results,
            next_page_token,
        })
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        self.detail_calls.set(self.detail_calls.get() + 1);

        if self.fail_details_for.as_deref() == Some(place_id) {
            return Err(PlacesError::ExternalApiError("details timed out".to_string()));
        }

        Ok(self.details.get(place_id).cloned())
    }
}
