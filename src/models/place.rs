// src/models/place.rs
// DOCUMENTATION: Core data structures for harvested places
// PURPOSE: Records written to the spreadsheet and the user's search request

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Default minimum count when interactive input is empty or not a number
pub const DEFAULT_MIN_COUNT: i64 = 10;

/// One business listing collected from the Places API
/// DOCUMENTATION: Maps positionally onto the Name, Address, Email, Website columns
/// No identity semantics: the same place returned twice is kept twice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Place name, when the summary carries one
    pub name: Option<String>,

    /// Formatted address, when the summary carries one
    pub address: Option<String>,

    /// Email from Place Details (empty if not provided)
    #[serde(default)]
    pub email: String,

    /// Website, detail value preferred over summary value (empty if neither)
    #[serde(default)]
    pub website: String,
}

impl PlaceRecord {
    /// Cell values in header order
    pub fn to_row(&self) -> [&str; 4] {
        [
            self.name.as_deref().unwrap_or(""),
            self.address.as_deref().unwrap_or(""),
            &self.email,
            &self.website,
        ]
    }
}

/// What the user asked to harvest
/// DOCUMENTATION: Built by the CLI layer (arguments or prompts) and validated before any request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "positive_min_count", skip_on_field_errors = false))]
pub struct SearchRequest {
    /// Free-text query, e.g. "dentists"
    #[validate(custom = "not_blank")]
    pub query: String,

    /// Free-text geographic anchor, e.g. "Lisbon, Portugal"
    #[validate(custom = "not_blank")]
    pub location: String,

    /// Stop paginating once at least this many places are collected
    pub min_count: i64,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, location: impl Into<String>, min_count: i64) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
            min_count,
        }
    }

    /// Target count as a collection size; only meaningful after validation
    pub fn target(&self) -> usize {
        usize::try_from(self.min_count).unwrap_or(0)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

fn positive_min_count(request: &SearchRequest) -> Result<(), ValidationError> {
    if request.min_count < 1 {
        let mut error = ValidationError::new("min_count");
        error.message = Some("minimum count must be greater than zero".into());
        return Err(error);
    }
    Ok(())
}

/// Parse a count typed at the interactive prompt
/// DOCUMENTATION: Anything that is not a plain non-negative integer falls back to DEFAULT_MIN_COUNT
pub fn parse_min_count(input: &str) -> i64 {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return DEFAULT_MIN_COUNT;
    }
    trimmed.parse().unwrap_or(DEFAULT_MIN_COUNT)
}
