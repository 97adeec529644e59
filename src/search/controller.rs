use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::debounce::Debouncer;
use super::state::SearchState;
use crate::catalog::Resolver;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_SIMULATED_NETWORK_DELAY: Duration = Duration::from_millis(100);

/// What to do with a response that arrives after a newer keystroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Drop it; state only ever reflects the latest keystroke.
    #[default]
    Discard,
    /// Apply every response as it resolves.
    LastToResolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTiming {
    pub debounce: Duration,
    pub simulated_delay: Duration,
    pub stale_results: StalePolicy,
}

impl Default for SearchTiming {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            simulated_delay: DEFAULT_SIMULATED_NETWORK_DELAY,
            stale_results: StalePolicy::default(),
        }
    }
}

struct PendingQuery {
    generation: u64,
    query: String,
}

struct InFlight {
    generation: u64,
    query: String,
    ready_at: Instant,
}

/// Drives the search box: input handling, debounce, simulated latency and
/// completion. All timing is driven by the `now` passed in by the caller.
pub struct SearchController<R> {
    resolver: R,
    timing: SearchTiming,
    state: SearchState,
    debouncer: Debouncer<PendingQuery>,
    in_flight: VecDeque<InFlight>,
    generation: u64,
    resolver_calls: usize,
}

impl<R: Resolver> SearchController<R> {
    /// Starts settled on `default_query` with its results already resolved.
    pub fn new(resolver: R, timing: SearchTiming, default_query: &str) -> Self {
        let search_results = resolver.resolve(default_query.trim());
        log::debug!(
            "Precomputed {} results for default query {:?}",
            search_results.len(),
            default_query
        );

        Self {
            resolver,
            timing,
            state: SearchState {
                loading: false,
                search_value: default_query.to_string(),
                search_results,
            },
            debouncer: Debouncer::new(timing.debounce),
            in_flight: VecDeque::new(),
            generation: 0,
            resolver_calls: 1,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn resolver_calls(&self) -> usize {
        self.resolver_calls
    }

    /// Called on every change of the input text.
    pub fn handle_input(&mut self, raw: &str, now: Instant) {
        self.generation += 1;
        self.state.loading = true;
        self.state.search_value = raw.to_string();
        self.debouncer.call(
            PendingQuery {
                generation: self.generation,
                query: raw.trim().to_string(),
            },
            now,
        );
    }

    /// Searches the current input again, e.g. after the catalog changed.
    pub fn resubmit(&mut self, now: Instant) {
        let current = self.state.search_value.clone();
        self.handle_input(&current, now);
    }

    pub fn replace_resolver(&mut self, resolver: R) {
        self.resolver = resolver;
    }

    /// Advances timers to `now`. Returns true when the state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let fired_at = self.debouncer.deadline();
        if let Some(pending) = self.debouncer.poll(now) {
            log::debug!(
                "Searching for {:?} (request {})",
                pending.query,
                pending.generation
            );
            // Latency counts from the debounce deadline, not from a late frame.
            let ready_at = fired_at.unwrap_or(now) + self.timing.simulated_delay;
            self.in_flight.push_back(InFlight {
                generation: pending.generation,
                query: pending.query,
                ready_at,
            });
        }

        let mut changed = false;
        while self
            .in_flight
            .front()
            .is_some_and(|request| request.ready_at <= now)
        {
            if let Some(request) = self.in_flight.pop_front() {
                changed |= self.complete(request);
            }
        }
        changed
    }

    /// Earliest instant at which `poll` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let in_flight = self.in_flight.iter().map(|request| request.ready_at).min();
        match (self.debouncer.deadline(), in_flight) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.debouncer.is_armed() && self.in_flight.is_empty()
    }

    fn complete(&mut self, request: InFlight) -> bool {
        let stale = request.generation != self.generation;
        if stale && self.timing.stale_results == StalePolicy::Discard {
            log::debug!(
                "Discarding stale results for {:?} (request {}, latest {})",
                request.query,
                request.generation,
                self.generation
            );
            return false;
        }

        let results = self.resolver.resolve(&request.query);
        self.resolver_calls += 1;
        log::info!("{} results for {:?}", results.len(), request.query);

        self.state.search_results = results;
        self.state.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Product};
    use crate::search::SearchView;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DEFAULT_QUERY: &str = "Organic Banana";

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Builtin catalog resolver that records every query it receives.
    fn recording_resolver() -> (impl Fn(&str) -> Vec<Product>, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&calls);
        let catalog = Catalog::builtin();
        let resolver = move |query: &str| {
            recorded.borrow_mut().push(query.to_string());
            catalog.resolve(query)
        };
        (resolver, calls)
    }

    fn controller_with(
        stale_results: StalePolicy,
    ) -> (
        SearchController<impl Fn(&str) -> Vec<Product>>,
        Rc<RefCell<Vec<String>>>,
    ) {
        let (resolver, calls) = recording_resolver();
        let timing = SearchTiming {
            stale_results,
            ..SearchTiming::default()
        };
        let controller = SearchController::new(resolver, timing, DEFAULT_QUERY);
        calls.borrow_mut().clear();
        (controller, calls)
    }

    #[test]
    fn mounts_with_default_results() {
        let (controller, _) = controller_with(StalePolicy::Discard);
        let state = controller.state();

        assert!(!state.loading);
        assert_eq!(state.search_value, DEFAULT_QUERY);
        assert_eq!(state.search_results, Catalog::builtin().resolve(DEFAULT_QUERY));
        assert!(matches!(state.view(), SearchView::Products(p) if !p.is_empty()));
        assert_eq!(controller.resolver_calls(), 1);
        assert!(controller.is_idle());
    }

    #[test]
    fn unmatched_query_settles_to_no_results() {
        let (mut controller, _) = controller_with(StalePolicy::Discard);
        let start = Instant::now();

        controller.handle_input("xyz-no-match", start);
        assert!(controller.state().loading);
        assert_eq!(controller.state().search_value, "xyz-no-match");
        assert_eq!(controller.state().view(), SearchView::Loading);

        assert!(!controller.poll(start + ms(299)));
        assert!(!controller.poll(start + ms(300)));
        assert!(controller.state().loading);
        assert!(!controller.poll(start + ms(399)));
        assert!(controller.state().loading);

        assert!(controller.poll(start + ms(400)));
        assert!(!controller.state().loading);
        assert_eq!(
            controller.state().view(),
            SearchView::NoResults {
                query: "xyz-no-match"
            }
        );
    }

    #[test]
    fn burst_of_keystrokes_resolves_once() {
        let (mut controller, calls) = controller_with(StalePolicy::Discard);
        let start = Instant::now();

        controller.handle_input("a", start);
        controller.poll(start + ms(100));
        controller.handle_input("ap", start + ms(150));
        controller.poll(start + ms(300));
        controller.handle_input("apple", start + ms(400));

        for step in (400..=1200).step_by(50) {
            controller.poll(start + ms(step));
        }

        assert_eq!(*calls.borrow(), ["apple"]);
        assert_eq!(controller.state().search_results, Catalog::builtin().resolve("apple"));
        assert!(!controller.state().loading);
    }

    #[test]
    fn resolver_gets_trimmed_query_and_state_keeps_raw() {
        let (mut controller, calls) = controller_with(StalePolicy::Discard);
        let start = Instant::now();

        controller.handle_input("  apple ", start);
        controller.poll(start + ms(1000));

        assert_eq!(*calls.borrow(), ["apple"]);
        assert_eq!(controller.state().search_value, "  apple ");
    }

    #[test]
    fn late_poll_fires_and_completes_together() {
        let (mut controller, _) = controller_with(StalePolicy::Discard);
        let start = Instant::now();

        controller.handle_input("oats", start);
        assert!(controller.poll(start + ms(5000)));
        assert_eq!(controller.state().search_results[0].name, "Organic Rolled Oats");
        assert!(controller.is_idle());
    }

    #[test]
    fn empty_query_shows_empty_list_not_message() {
        let (mut controller, calls) = controller_with(StalePolicy::Discard);
        let start = Instant::now();

        controller.handle_input("", start);
        controller.poll(start + ms(400));

        assert_eq!(*calls.borrow(), [""]);
        assert_eq!(controller.state().view(), SearchView::Products(&[]));
    }

    #[test]
    fn next_deadline_tracks_debounce_then_delay() {
        let (mut controller, _) = controller_with(StalePolicy::Discard);
        let start = Instant::now();
        assert_eq!(controller.next_deadline(), None);

        controller.handle_input("milk", start);
        assert_eq!(controller.next_deadline(), Some(start + ms(300)));

        controller.poll(start + ms(310));
        // delay is counted from when the debounce was due
        assert_eq!(controller.next_deadline(), Some(start + ms(400)));

        controller.poll(start + ms(400));
        assert_eq!(controller.next_deadline(), None);
        assert!(controller.is_idle());
    }

    #[test]
    fn stale_response_is_discarded() {
        let (mut controller, calls) = controller_with(StalePolicy::Discard);
        let defaults = controller.state().search_results.clone();
        let start = Instant::now();

        controller.handle_input("apple", start);
        controller.poll(start + ms(300));
        controller.handle_input("banana", start + ms(350));

        assert!(!controller.poll(start + ms(400)));
        assert!(controller.state().loading);
        assert_eq!(controller.state().search_results, defaults);

        assert!(controller.poll(start + ms(750)));
        assert!(!controller.state().loading);
        assert_eq!(*calls.borrow(), ["banana"]);
        assert_eq!(controller.state().search_value, "banana");
    }

    #[test]
    fn last_to_resolve_applies_stale_response() {
        let (mut controller, calls) = controller_with(StalePolicy::LastToResolve);
        let start = Instant::now();

        controller.handle_input("apple", start);
        controller.poll(start + ms(300));
        controller.handle_input("banana", start + ms(350));

        assert!(controller.poll(start + ms(400)));
        assert!(!controller.state().loading);
        assert_eq!(controller.state().search_value, "banana");
        assert_eq!(controller.state().search_results, Catalog::builtin().resolve("apple"));

        assert!(controller.poll(start + ms(750)));
        assert_eq!(*calls.borrow(), ["apple", "banana"]);
        assert_eq!(controller.state().search_results, Catalog::builtin().resolve("banana"));
    }

    #[test]
    fn resubmit_uses_replaced_resolver() {
        let mut controller = SearchController::new(Catalog::builtin(), SearchTiming::default(), "kiwi");
        assert!(controller.state().search_results.is_empty());

        let catalog = Catalog::from_json_str(r#"[{"id": 1, "name": "Gold Kiwi"}]"#).unwrap();
        controller.replace_resolver(catalog);

        let start = Instant::now();
        controller.resubmit(start);
        assert!(controller.state().loading);
        controller.poll(start + ms(400));

        assert_eq!(controller.state().search_results[0].name, "Gold Kiwi");
        assert_eq!(controller.state().search_value, "kiwi");
        assert_eq!(controller.resolver_calls(), 2);
    }
}
