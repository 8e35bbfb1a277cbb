// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Front end input handling and the harvest pipeline

pub mod cli;
pub mod harvest;

pub use cli::Cli;
pub use harvest::{harvest, HarvestOutcome};
