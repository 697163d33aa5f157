//! Client for the npm registry search endpoint.
//!
//! [`RegistryClient::try_search`] reports every failure as a [`SearchError`];
//! [`RegistryClient::search`] absorbs them into an empty result list.

mod client;
mod error;
mod record;

pub use client::{
    DEFAULT_REGISTRY_URL, PAGE_SIZE, RegistryClient, RegistryConfig, SEARCH_PATH,
};
pub use error::SearchError;
pub use record::PackageRecord;
pub use reqwest::StatusCode;

/// Anything that can answer a package search.
///
/// [`RegistryClient`] implements this by absorbing its own failures, so an
/// `Err` only ever comes from other sources.
pub trait PackageSource {
    fn fetch(&self, query: &str) -> Result<Vec<PackageRecord>, SearchError>;
}

impl<F> PackageSource for F
where
    F: Fn(&str) -> Result<Vec<PackageRecord>, SearchError>,
{
    fn fetch(&self, query: &str) -> Result<Vec<PackageRecord>, SearchError> {
        self(query)
    }
}
