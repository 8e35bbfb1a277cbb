// src/handlers/harvest.rs
// DOCUMENTATION: Collect-then-export pipeline
// PURPOSE: Run the collector and write the spreadsheet when anything was found

use crate::errors::PlacesError;
use crate::models::SearchRequest;
use crate::services::exporter;
use crate::services::{CollectionObserver, CollectionStats, PlaceCollector, PlacesApi};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How a harvest ended
#[derive(Debug)]
pub enum HarvestOutcome {
    /// Spreadsheet written
    Exported {
        path: PathBuf,
        stats: CollectionStats,
    },
    /// Nothing collected, so no file was written
    NoData { stats: CollectionStats },
    /// Records were collected but the file could not be written
    ExportFailed {
        error: PlacesError,
        stats: CollectionStats,
    },
}

/// Run one harvest
/// DOCUMENTATION: Invalid requests return Err before any API call;
/// upstream and export failures are reported through HarvestOutcome
pub async fn harvest<A: PlacesApi>(
    api: &A,
    request: &SearchRequest,
    destination: &Path,
    page_delay: Duration,
    observer: &mut dyn CollectionObserver,
) -> Result<HarvestOutcome, PlacesError> {
    let collection = PlaceCollector::new(api)
        .with_page_delay(page_delay)
        .collect(request, observer)
        .await?;

    if collection.records.is_empty() {
        log::warn!("No data found.");
        return Ok(HarvestOutcome::NoData {
            stats: collection.stats,
        });
    }

    match exporter::export(&collection.records, destination) {
        Ok(()) => Ok(HarvestOutcome::Exported {
            path: destination.to_path_buf(),
            stats: collection.stats,
        }),
        Err(error) => Ok(HarvestOutcome::ExportFailed {
            error,
            stats: collection.stats,
        }),
    }
}
