use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{spawn, JoinHandle};

use crate::resolver::{Resolver, SearchError, SearchResult};

/// What a settled search produced.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The text that was submitted, captured at submit time. Edits made while
    /// the search was on the wire do not show up here.
    pub query: String,
    pub result: Result<Vec<SearchResult>, SearchError>,
}

/// Runs searches off the caller's thread, one thread per submitted query.
///
/// There is no cancellation, no timeout and no coalescing. A rapid second
/// submit simply starts a second overlapping search; outcomes come back in
/// completion order, so the later finisher wins.
pub struct SearchDispatcher {
    resolver: Arc<dyn Resolver>,
    searches: Vec<(u64, JoinHandle<SearchOutcome>, String)>,
    channel: (Sender<u64>, Receiver<u64>),
    id: u64,
}

impl SearchDispatcher {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            searches: vec![],
            channel: channel(),
            id: 0,
        }
    }

    /// Kick off a search for `query`.
    pub fn submit(&mut self, query: &str) {
        let id = self.id;
        self.id += 1;

        // Clone values to be moved into the thread.
        let query = query.to_string();
        let thread_query = query.clone();
        let resolver = self.resolver.clone();
        let tx = self.channel.0.clone();

        self.searches.push((
            id,
            spawn(move || {
                let result = resolver.resolve(&thread_query);
                if tx.send(id).is_err() {
                    log::debug!("Could not send the search settled message. This most likely happened because the app was terminated.")
                }
                SearchOutcome {
                    query: thread_query,
                    result,
                }
            }),
            query,
        ));
    }

    /// Collect every search that settled since the last call, in completion
    /// order.
    pub fn settled(&mut self) -> Vec<SearchOutcome> {
        let mut outcomes = vec![];

        // Get all pending messages and work them.
        for id in self.channel.1.try_iter() {
            let settled_search = self.searches.iter().position(|s| s.0 == id);

            if let Some(i) = settled_search {
                let search = self.searches.remove(i);
                match search.1.join() {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        log::error!(
                            "Failed to join the search thread for {:?}. Reason:\r\n{:?}",
                            search.2,
                            e
                        );
                    }
                }
            }
        }

        outcomes
    }

    /// Number of searches still on the wire.
    pub fn in_flight(&self) -> usize {
        self.searches.len()
    }
}

#[cfg(test)]
struct StaticResolver(Vec<SearchResult>);

#[cfg(test)]
impl Resolver for StaticResolver {
    fn resolve(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
fn wait_for_outcomes(dispatcher: &mut SearchDispatcher, count: usize) -> Vec<SearchOutcome> {
    let mut outcomes = vec![];
    for _ in 0..500 {
        outcomes.extend(dispatcher.settled());
        if outcomes.len() >= count {
            return outcomes;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    panic!(
        "only {} of {} searches settled within the deadline",
        outcomes.len(),
        count
    );
}

#[test]
fn settle_a_single_search() {
    use crate::math::Coordinate;

    let city_hall = SearchResult {
        coordinate: Coordinate::new(37.5665, 126.9780).unwrap(),
        label: "Seoul City Hall".into(),
        address: "110 Sejong-daero, Jung-gu, Seoul".into(),
    };
    let mut dispatcher = SearchDispatcher::new(Arc::new(StaticResolver(vec![city_hall.clone()])));

    dispatcher.submit("Seoul City Hall");
    assert_eq!(dispatcher.in_flight(), 1);

    let outcomes = wait_for_outcomes(&mut dispatcher, 1);
    assert_eq!(outcomes[0].query, "Seoul City Hall");
    assert_eq!(outcomes[0].result.as_ref().unwrap(), &vec![city_hall]);
    assert_eq!(dispatcher.in_flight(), 0);
}

#[test]
fn overlapping_submits_all_settle() {
    let mut dispatcher = SearchDispatcher::new(Arc::new(StaticResolver(vec![])));

    dispatcher.submit("first");
    dispatcher.submit("second");

    let outcomes = wait_for_outcomes(&mut dispatcher, 2);
    let mut queries: Vec<_> = outcomes.iter().map(|o| o.query.as_str()).collect();
    queries.sort_unstable();
    assert_eq!(queries, vec!["first", "second"]);
}
