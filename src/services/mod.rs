// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod collector;
pub mod exporter;
pub mod google_places_client;

#[cfg(test)]
pub mod test_support;

pub use collector::*;
pub use google_places_client::*;
