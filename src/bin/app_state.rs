use std::sync::Arc;

use places::*;

/// Whether a search is currently on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
}

/// A message the shell should put in front of the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    PermissionDenied,
    NoResults,
    SearchFailed(String),
}

/// The state behind the searchable map: the query being typed, the markers of
/// the latest successful search, and the viewport.
pub struct AppState {
    pub query: String,
    pub places: Vec<SearchResult>,
    pub region: Region,
    pub phase: SearchPhase,
    alert: Option<Alert>,
    dispatcher: SearchDispatcher,
}

impl AppState {
    pub fn new(region: Region, resolver: Arc<dyn Resolver>) -> Self {
        Self {
            query: String::new(),
            places: vec![],
            region,
            phase: SearchPhase::Idle,
            alert: None,
            dispatcher: SearchDispatcher::new(resolver),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Fire the current query at the resolver.
    pub fn submit(&mut self) {
        self.phase = SearchPhase::Searching;
        self.dispatcher.submit(&self.query);
    }

    /// Work every search that settled since the last poll.
    pub fn poll_searches(&mut self) {
        for outcome in self.dispatcher.settled() {
            self.apply(outcome);
        }
    }

    pub fn is_searching(&self) -> bool {
        self.phase == SearchPhase::Searching
    }

    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    // The marker set always mirrors the latest successful search. Failures
    // raise an alert and leave both the markers and the region untouched.
    fn apply(&mut self, outcome: SearchOutcome) {
        self.phase = SearchPhase::Idle;
        match outcome.result {
            Ok(places) => {
                if let Some(first) = places.first() {
                    self.region.focus_on(first.coordinate);
                }
                self.places = places;
            }
            Err(e) => {
                log::warn!("Search for {:?} failed. Reason:\r\n{}", outcome.query, e);
                self.alert = Some(match e {
                    SearchError::PermissionDenied => Alert::PermissionDenied,
                    SearchError::NoResults => Alert::NoResults,
                    other => Alert::SearchFailed(other.to_string()),
                });
            }
        }
    }
}

#[cfg(test)]
struct NeverResolves;

#[cfg(test)]
impl Resolver for NeverResolves {
    fn resolve(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
        unreachable!("the tests feed outcomes in directly")
    }
}

#[cfg(test)]
fn test_state() -> AppState {
    let seoul = Coordinate::new(37.5665, 126.9780).unwrap();
    AppState::new(Region::new(seoul, 0.0922, 0.0421), Arc::new(NeverResolves))
}

#[cfg(test)]
fn city_hall() -> SearchResult {
    SearchResult {
        coordinate: Coordinate::new(37.5663, 126.9779).unwrap(),
        label: "Seoul City Hall".into(),
        address: "110 Sejong-daero, Jung-gu, Seoul".into(),
    }
}

#[test]
fn success_replaces_markers_and_recenters() {
    let mut state = test_state();
    state.phase = SearchPhase::Searching;

    state.apply(SearchOutcome {
        query: "Seoul City Hall".into(),
        result: Ok(vec![city_hall()]),
    });

    assert_eq!(state.phase, SearchPhase::Idle);
    assert_eq!(state.places, vec![city_hall()]);
    assert_eq!(state.region.center, city_hall().coordinate);
    assert_eq!(state.region.latitude_delta, FOCUS_DELTA);
    assert_eq!(state.region.longitude_delta, FOCUS_DELTA);
    assert_eq!(state.take_alert(), None);
}

#[test]
fn recenters_on_the_first_of_many_results() {
    let mut state = test_state();

    let deoksugung = SearchResult {
        coordinate: Coordinate::new(37.5658, 126.9751).unwrap(),
        label: "Deoksugung".into(),
        address: "99 Sejong-daero, Jung-gu, Seoul".into(),
    };

    state.apply(SearchOutcome {
        query: "Seoul City Hall".into(),
        result: Ok(vec![city_hall(), deoksugung.clone()]),
    });

    assert_eq!(state.places.len(), 2);
    assert_eq!(state.region.center, city_hall().coordinate);
    assert_eq!(state.places[1], deoksugung);
}

#[test]
fn empty_success_clears_markers_but_keeps_the_region() {
    let mut state = test_state();
    state.places = vec![city_hall()];
    let region_before = state.region;

    state.apply(SearchOutcome {
        query: "gibberish".into(),
        result: Ok(vec![]),
    });

    assert!(state.places.is_empty());
    assert_eq!(state.region, region_before);
    assert_eq!(state.take_alert(), None);
}

#[test]
fn failure_leaves_state_untouched_and_raises_an_alert() {
    let mut state = test_state();
    state.places = vec![city_hall()];
    let region_before = state.region;
    state.phase = SearchPhase::Searching;

    state.apply(SearchOutcome {
        query: "Seoul City Hall".into(),
        result: Err(SearchError::Http {
            status: 401,
            reason: "Unauthorized".into(),
        }),
    });

    assert_eq!(state.phase, SearchPhase::Idle);
    assert_eq!(state.places, vec![city_hall()]);
    assert_eq!(state.region, region_before);
    assert!(matches!(state.take_alert(), Some(Alert::SearchFailed(_))));
}

#[test]
fn permission_and_no_results_map_to_their_own_alerts() {
    let mut state = test_state();

    state.apply(SearchOutcome {
        query: "a".into(),
        result: Err(SearchError::PermissionDenied),
    });
    assert_eq!(state.take_alert(), Some(Alert::PermissionDenied));

    state.apply(SearchOutcome {
        query: "b".into(),
        result: Err(SearchError::NoResults),
    });
    assert_eq!(state.take_alert(), Some(Alert::NoResults));
    assert!(state.places.is_empty());
}

#[test]
fn repeated_outcome_is_idempotent() {
    let mut state = test_state();

    for _ in 0..2 {
        state.apply(SearchOutcome {
            query: "Seoul City Hall".into(),
            result: Ok(vec![city_hall()]),
        });
    }

    assert_eq!(state.places, vec![city_hall()]);
    assert_eq!(state.region.center, city_hall().coordinate);
    assert_eq!(state.region.latitude_delta, FOCUS_DELTA);
}

#[test]
fn overlapping_searches_last_writer_wins() {
    let mut state = test_state();
    state.phase = SearchPhase::Searching;

    let busan = SearchResult {
        coordinate: Coordinate::new(35.1796, 129.0756).unwrap(),
        label: "Busan Station".into(),
        address: "206 Jungang-daero, Dong-gu, Busan".into(),
    };

    state.apply(SearchOutcome {
        query: "Seoul City Hall".into(),
        result: Ok(vec![city_hall()]),
    });
    state.apply(SearchOutcome {
        query: "Busan Station".into(),
        result: Ok(vec![busan.clone()]),
    });

    assert_eq!(state.places, vec![busan.clone()]);
    assert_eq!(state.region.center, busan.coordinate);
}
