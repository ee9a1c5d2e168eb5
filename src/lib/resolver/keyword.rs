use serde_derive::Deserialize;

use super::{Resolver, SearchError, SearchResult};
use crate::math::Coordinate;

/// Keyword search against a remote place index.
///
/// The request parameters besides the query itself are fixed: first page,
/// capped at 15 records, sorted by accuracy with exact-match analysis.
pub struct KeywordSearch {
    endpoint: String,
    api_key: Option<String>,
    size: u32,
    page: u32,
    sort: String,
    analyze_type: String,
}

#[derive(Debug, Deserialize)]
struct Document {
    place_name: String,
    /// Longitude in decimal degrees, transmitted as a string.
    x: String,
    /// Latitude, same encoding as `x`.
    y: String,
    address_name: String,
}

#[derive(Debug, Deserialize)]
struct KeywordResponse {
    documents: Vec<Document>,
}

impl KeywordSearch {
    /// The credential is optional on purpose. A missing key is not checked at
    /// startup and only fails once a search is actually made.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            size: 15,
            page: 1,
            sort: "accuracy".into(),
            analyze_type: "exact".into(),
        }
    }
}

impl Resolver for KeywordSearch {
    fn resolve(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let response = ureq::get(&self.endpoint)
            .query("query", query)
            .query("size", &self.size.to_string())
            .query("sort", &self.sort)
            .query("analyze_type", &self.analyze_type)
            .query("page", &self.page.to_string())
            .set("Authorization", api_key)
            .call();

        if !response.ok() {
            return Err(SearchError::Http {
                status: response.status(),
                reason: response.status_text().to_string(),
            });
        }

        let body = response
            .into_string()
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        parse_documents(&body)
    }
}

/// Decode a keyword search response body into results.
///
/// Coordinates are validated here. A single malformed record fails the whole
/// search instead of smuggling NaN into the view layer.
fn parse_documents(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: KeywordResponse = serde_json::from_str(body)?;
    response
        .documents
        .into_iter()
        .map(|document| {
            let coordinate = Coordinate::parse(&document.y, &document.x)?;
            Ok(SearchResult {
                coordinate,
                label: document.place_name,
                address: document.address_name,
            })
        })
        .collect()
}

#[test]
fn parse_a_single_document() {
    let body = r#"{
        "documents": [
            {
                "place_name": "Seoul City Hall",
                "x": "126.9780",
                "y": "37.5665",
                "address_name": "110 Sejong-daero, Jung-gu, Seoul"
            }
        ]
    }"#;

    let results = parse_documents(body).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label, "Seoul City Hall");
    assert_eq!(results[0].address, "110 Sejong-daero, Jung-gu, Seoul");
    assert_eq!(results[0].coordinate.latitude, 37.5665);
    assert_eq!(results[0].coordinate.longitude, 126.9780);
}

#[test]
fn parse_no_documents() {
    let results = parse_documents(r#"{ "documents": [] }"#).unwrap();
    assert!(results.is_empty());
}

#[test]
fn parse_rejects_a_malformed_coordinate() {
    let body = r#"{
        "documents": [
            { "place_name": "A", "x": "126.9780", "y": "37.5665", "address_name": "a" },
            { "place_name": "B", "x": "oops", "y": "37.5665", "address_name": "b" }
        ]
    }"#;

    match parse_documents(body) {
        Err(SearchError::Malformed(error)) => {
            assert_eq!(error.field, "longitude");
            assert_eq!(error.value, "oops");
        }
        other => panic!("expected a malformed coordinate error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn parse_rejects_garbage_json() {
    assert!(matches!(
        parse_documents("not json"),
        Err(SearchError::Decode(_))
    ));
}

#[test]
fn missing_api_key_fails_before_any_request() {
    let search = KeywordSearch::new("http://localhost:1/v2/local/search/keyword.json", None);
    assert!(matches!(
        search.resolve("Seoul City Hall"),
        Err(SearchError::MissingApiKey)
    ));
}
