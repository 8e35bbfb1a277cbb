// src/services/collector.rs
// DOCUMENTATION: Search, paginate and enrich loop
// PURPOSE: Collect at least `min_count` places from the Places API into memory

use crate::errors::PlacesError;
use crate::models::{PlaceRecord, SearchRequest};
use crate::services::{to_place_record, GooglePlace, PlacesApi, SearchPage};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use validator::Validate;

/// Default wait before requesting the next page; Google rejects a page token used too early
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// Progress snapshot passed to observers after each record
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub collected: usize,
    pub target: usize,
    pub elapsed: Duration,
}

impl Progress {
    /// Seconds left if every remaining place takes the average time so far
    pub fn estimated_remaining_secs(&self) -> f64 {
        if self.collected == 0 {
            return 0.0;
        }
        let elapsed = self.elapsed.as_secs_f64();
        let per_place = elapsed / self.collected as f64;
        per_place * self.target as f64 - elapsed
    }
}

/// Receives a notification every time a record is appended
pub trait CollectionObserver {
    fn on_record(&mut self, progress: &Progress);
}

/// Logs progress with a time-remaining estimate
pub struct LogProgress;

impl CollectionObserver for LogProgress {
    fn on_record(&mut self, progress: &Progress) {
        log::info!(
            "Collected {}/{} places. Estimated time remaining: {:.2} seconds.",
            progress.collected,
            progress.target,
            progress.estimated_remaining_secs()
        );
    }
}

/// Ignores progress
pub struct NoProgress;

impl CollectionObserver for NoProgress {
    fn on_record(&mut self, _progress: &Progress) {}
}

/// Collection statistics
/// DOCUMENTATION: Tracks what a collection run did, logged at the end of the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    pub query: String,
    pub location: String,
    /// Search pages fetched (initial page included)
    pub pages_fetched: u32,
    /// Total requests issued (search + details)
    pub api_requests: u32,
    /// Records accumulated
    pub places_collected: usize,
    /// Error that ended the run early, if any
    pub error: Option<String>,
    pub duration_ms: u64,
    pub started_at: String,
    pub completed_at: Option<String>,
}

impl CollectionStats {
    pub fn new(request: &SearchRequest) -> Self {
        Self {
            query: request.query.clone(),
            location: request.location.clone(),
            pages_fetched: 0,
            api_requests: 0,
            places_collected: 0,
            error: None,
            duration_ms: 0,
            started_at: Utc::now().to_rfc3339(),
            completed_at: None,
        }
    }

    /// Mark collection as completed
    pub fn complete(&mut self, places_collected: usize, duration: Duration) {
        self.places_collected = places_collected;
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.completed_at = Some(Utc::now().to_rfc3339());
    }
}

/// Transient state of one collection run
#[derive(Debug, Default)]
pub struct SearchSession {
    /// Results of the page being processed
    pub page: Vec<GooglePlace>,
    /// Token for the page after the current one
    pub next_page_token: Option<String>,
    /// Records accumulated so far, in API order
    pub records: Vec<PlaceRecord>,
}

impl SearchSession {
    fn load(&mut self, page: SearchPage) {
        self.page = page.results;
        self.next_page_token = page.next_page_token;
    }
}

/// Output of a collection run
#[derive(Debug)]
pub struct Collection {
    pub records: Vec<PlaceRecord>,
    pub stats: CollectionStats,
}

/// Drives the search-and-paginate loop
/// DOCUMENTATION: Borrows an API client built once at startup; holds no other state
pub struct PlaceCollector<'a, A: PlacesApi> {
    api: &'a A,
    page_delay: Duration,
}

impl<'a, A: PlacesApi> PlaceCollector<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Collect places for a request
    /// DOCUMENTATION: Main collection method
    ///
    /// Process:
    /// 1. Validate the request (no request is issued for invalid input)
    /// 2. Search, then look up details for every result on the page
    /// 3. Follow the next page token while fewer than `min_count` records exist,
    ///    waiting `page_delay` before each follow-up search
    /// 4. On the first upstream error, stop and keep what was collected
    ///
    /// # Returns
    /// Err only for invalid input; upstream failures yield Ok with partial records
    pub async fn collect(
        &self,
        request: &SearchRequest,
        observer: &mut dyn CollectionObserver,
    ) -> Result<Collection, PlacesError> {
        request.validate()?;

        let start_time = Instant::now();
        let mut stats = CollectionStats::new(request);
        let mut session = SearchSession::default();

        log::info!(
            "Starting the scrape for '{}' in '{}' with a minimum count of {}",
            request.query,
            request.location,
            request.min_count
        );

        if let Err(e) = self
            .run(request, &mut session, &mut stats, observer, start_time)
            .await
        {
            log::error!("Error fetching places: {}", e);
            stats.error = Some(e.to_string());
        }

        stats.complete(session.records.len(), start_time.elapsed());

        log::info!(
            "Collection finished: {} places, {} pages, {} API requests in {} ms{}",
            stats.places_collected,
            stats.pages_fetched,
            stats.api_requests,
            stats.duration_ms,
            if stats.error.is_some() { " (stopped early)" } else { "" }
        );

        Ok(Collection {
            records: session.records,
            stats,
        })
    }

    async fn run(
        &self,
        request: &SearchRequest,
        session: &mut SearchSession,
        stats: &mut CollectionStats,
        observer: &mut dyn CollectionObserver,
        start_time: Instant,
    ) -> Result<(), PlacesError> {
        let target = request.target();

        let first_page = self.search(request, None, stats).await?;
        if first_page.results.is_empty() {
            log::warn!("Search returned no results");
            return Ok(());
        }
        session.load(first_page);

        loop {
            log::info!(
                "Processing page {} ({} results)",
                stats.pages_fetched,
                session.page.len()
            );

            for place in std::mem::take(&mut session.page) {
                log::debug!("Fetching details for: {}", place.place_id);
                stats.api_requests += 1;
                let details = self.api.place_details(&place.place_id).await?;

                session
                    .records
                    .push(to_place_record(&place, details.as_ref()));

                observer.on_record(&Progress {
                    collected: session.records.len(),
                    target,
                    elapsed: start_time.elapsed(),
                });
            }

            match session.next_page_token.take() {
                Some(token) if session.records.len() < target => {
                    log::debug!("Waiting {:?} before next page", self.page_delay);
                    tokio::time::sleep(self.page_delay).await;
                    let page = self.search(request, Some(&token), stats).await?;
                    session.load(page);
                }
                _ => return Ok(()),
            }
        }
    }

    async fn search(
        &self,
        request: &SearchRequest,
        page_token: Option<&str>,
        stats: &mut CollectionStats,
    ) -> Result<SearchPage, PlacesError> {
        stats.api_requests += 1;
        let page = self
            .api
            .text_search(&request.query, &request.location, page_token)
            .await?;
        stats.pages_fetched += 1;
        Ok(page)
    }
}
