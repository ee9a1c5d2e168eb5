mod geocode;
mod keyword;

pub use geocode::*;
pub use keyword::*;

use thiserror::Error;

use crate::math::{Coordinate, MalformedCoordinate};

/// One resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub coordinate: Coordinate,
    pub label: String,
    pub address: String,
}

/// Why a single search attempt failed.
///
/// Nothing here is fatal to the process and nothing gets retried. Every
/// failure is scoped to the one search that caused it.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("location permission was denied")]
    PermissionDenied,
    #[error("no places matched the query")]
    NoResults,
    #[error("no API key is configured for the keyword search service")]
    MissingApiKey,
    #[error("keyword search request failed with status {status}: {reason}")]
    Http { status: u16, reason: String },
    #[error("could not read the keyword search response: {0}")]
    Transport(String),
    #[error("could not decode the keyword search response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Malformed(#[from] MalformedCoordinate),
    #[error("the geocoding provider failed: {0}")]
    Provider(String),
}

/// Turns free text into places.
///
/// Callers never know which provider is behind the trait; the keyword search
/// service and the device geocoder are interchangeable here.
pub trait Resolver: Send + Sync {
    fn resolve(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}
