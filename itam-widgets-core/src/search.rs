//! Debounced live search state machine.
//!
//! The browser layer drives [`LiveSearch`] with input events, timer expiries,
//! fetch completions and outside clicks, and renders whatever
//! [`LiveSearch::view`] returns.
//!
//! ```text
//! keyup("ab")  -> Scheduled { ticket: 1, delay_ms: 300 }
//! keyup("abc") -> Scheduled { ticket: 2, delay_ms: 300 }   (ticket 1 superseded)
//! fire(1)      -> None
//! fire(2)      -> Some(GET /api/search?q=abc)
//! complete(..) -> Items / NoResults / Failed
//! ```
//!
//! Requests are never cancelled and responses carry no generation check:
//! whichever response resolves last is what the list shows, even after the
//! results were dismissed.

use crate::config::SearchConfig;
use crate::error::{Result, WidgetError};
use serde::{Deserialize, Serialize};

/// One row of the `/api/search` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub name: String,
    pub url: String,
    /// Entity type shown as a badge ("Asset", "Supplier", ...)
    #[serde(rename = "type")]
    pub kind: String,
}

/// What the result list currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsView {
    /// Cleared and hidden
    #[default]
    Hidden,
    Items(Vec<SearchItem>),
    /// A single disabled "No results found" row
    NoResults,
    /// A single disabled "Search failed" row
    Failed,
}

impl ResultsView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultsView::Hidden)
    }
}

/// Identifies one scheduled debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

/// Result of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Query too short; results hidden, nothing scheduled
    Cleared,
    /// Start a timer and call [`LiveSearch::fire`] with the ticket when it expires
    Scheduled {
        ticket: DebounceTicket,
        delay_ms: u32,
    },
}

/// A search request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct LiveSearch {
    config: SearchConfig,
    last_ticket: u64,
    pending: Option<(DebounceTicket, String)>,
    in_flight: usize,
    view: ResultsView,
}

impl LiveSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            last_ticket: 0,
            pending: None,
            in_flight: 0,
            view: ResultsView::Hidden,
        }
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    /// Whether a debounce timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of requests issued whose response has not arrived yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Handle a change of the input value. Always supersedes the pending timer.
    pub fn keyup(&mut self, raw: &str) -> KeyOutcome {
        self.pending = None;

        let query = raw.trim();
        // Length in UTF-16 code units, as the browser counts it.
        if query.encode_utf16().count() < self.config.min_query_len {
            self.view = ResultsView::Hidden;
            return KeyOutcome::Cleared;
        }

        self.last_ticket += 1;
        let ticket = DebounceTicket(self.last_ticket);
        self.pending = Some((ticket, query.to_string()));
        KeyOutcome::Scheduled {
            ticket,
            delay_ms: self.config.debounce_ms,
        }
    }

    /// Handle an expired timer. Only the most recent ticket yields a request.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<SearchRequest> {
        match self.pending.take() {
            Some((current, query)) if current == ticket => {
                self.in_flight += 1;
                let url = search_url(&self.config.endpoint, &query);
                log::info!("search: requesting {}", url);
                Some(SearchRequest { query, url })
            }
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Handle a finished request.
    pub fn complete(&mut self, result: Result<Vec<SearchItem>>) -> &ResultsView {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.view = match result {
            Ok(items) if items.is_empty() => ResultsView::NoResults,
            Ok(items) => ResultsView::Items(items),
            Err(e) => {
                log::error!("Error during search: {}", e);
                ResultsView::Failed
            }
        };
        &self.view
    }

    /// Handle a click outside the input. Pending timers and in-flight
    /// requests are left alone.
    pub fn dismiss(&mut self) -> &ResultsView {
        self.view = ResultsView::Hidden;
        &self.view
    }
}

/// `<endpoint>?q=<percent-encoded query>`
///
/// Unlike `encodeURIComponent`, `!'()*` are percent-encoded too; the server
/// decodes both forms to the same query.
pub fn search_url(endpoint: &str, query: &str) -> String {
    format!("{}?q={}", endpoint, urlencoding::encode(query))
}

/// Parse a `/api/search` response body.
pub fn parse_results(body: &str) -> Result<Vec<SearchItem>> {
    serde_json::from_str(body).map_err(|e| WidgetError::Search(format!("invalid response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Timers driven by a manual clock, firing in due order.
    struct VirtualClock {
        now_ms: u64,
        timers: Vec<(u64, DebounceTicket)>,
        requests: Vec<SearchRequest>,
    }

    impl VirtualClock {
        fn new() -> Self {
            Self {
                now_ms: 0,
                timers: Vec::new(),
                requests: Vec::new(),
            }
        }

        fn type_text(&mut self, search: &mut LiveSearch, text: &str) -> KeyOutcome {
            let outcome = search.keyup(text);
            if let KeyOutcome::Scheduled { ticket, delay_ms } = outcome {
                self.timers.push((self.now_ms + u64::from(delay_ms), ticket));
            }
            outcome
        }

        fn advance(&mut self, search: &mut LiveSearch, ms: u64) {
            self.now_ms += ms;
            let now = self.now_ms;
            let mut due: Vec<(u64, DebounceTicket)> =
                self.timers.iter().copied().filter(|(at, _)| *at <= now).collect();
            self.timers.retain(|(at, _)| *at > now);
            due.sort_by_key(|(at, _)| *at);
            for (_, ticket) in due {
                if let Some(request) = search.fire(ticket) {
                    self.requests.push(request);
                }
            }
        }
    }

    fn item(name: &str, kind: &str) -> SearchItem {
        SearchItem {
            name: name.to_string(),
            url: format!("/{}/1", kind.to_lowercase()),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn test_short_query_issues_nothing() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let mut clock = VirtualClock::new();

        assert_eq!(clock.type_text(&mut search, "a"), KeyOutcome::Cleared);
        assert_eq!(clock.type_text(&mut search, "  b  "), KeyOutcome::Cleared);
        clock.advance(&mut search, 1_000);

        assert!(clock.requests.is_empty());
        assert_eq!(search.view(), &ResultsView::Hidden);
        assert!(!search.view().is_visible());
    }

    #[test]
    fn test_rapid_keystrokes_collapse_to_one_request() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let mut clock = VirtualClock::new();

        clock.type_text(&mut search, "la");
        clock.advance(&mut search, 100);
        clock.type_text(&mut search, "lap");
        clock.advance(&mut search, 299);
        assert!(clock.requests.is_empty());

        clock.advance(&mut search, 1);
        assert_eq!(clock.requests.len(), 1);
        assert_eq!(clock.requests[0].query, "lap");
        assert_eq!(clock.requests[0].url, "/api/search?q=lap");

        clock.advance(&mut search, 1_000);
        assert_eq!(clock.requests.len(), 1);
    }

    #[test]
    fn test_quiet_period_between_keystrokes_sends_both() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let mut clock = VirtualClock::new();

        clock.type_text(&mut search, "la");
        clock.advance(&mut search, 300);
        clock.type_text(&mut search, "lap");
        clock.advance(&mut search, 300);

        let queries: Vec<&str> = clock.requests.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["la", "lap"]);
        assert_eq!(search.in_flight(), 2);
    }

    #[test]
    fn test_shortening_query_cancels_pending_timer() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let mut clock = VirtualClock::new();

        clock.type_text(&mut search, "la");
        assert!(search.is_pending());
        clock.type_text(&mut search, "l");
        assert!(!search.is_pending());
        clock.advance(&mut search, 1_000);
        assert!(clock.requests.is_empty());
    }

    #[test]
    fn test_query_length_counts_utf16_units() {
        let mut search = LiveSearch::new(SearchConfig::default());
        // One emoji is two UTF-16 code units.
        assert!(matches!(search.keyup("😀"), KeyOutcome::Scheduled { .. }));
        assert_eq!(search.keyup("é"), KeyOutcome::Cleared);
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        assert_eq!(search_url("/api/search", "it's (new)!"), "/api/search?q=it%27s%20%28new%29%21");
    }

    #[test]
    fn test_query_is_trimmed_and_encoded() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let KeyOutcome::Scheduled { ticket, delay_ms } = search.keyup("  dell & hp ") else {
            panic!("expected a scheduled search");
        };
        assert_eq!(delay_ms, 300);
        let request = search.fire(ticket).unwrap();
        assert_eq!(request.query, "dell & hp");
        assert_eq!(request.url, "/api/search?q=dell%20%26%20hp");
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let KeyOutcome::Scheduled { ticket: first, .. } = search.keyup("ab") else {
            panic!("expected a scheduled search");
        };
        let KeyOutcome::Scheduled { ticket: second, .. } = search.keyup("abc") else {
            panic!("expected a scheduled search");
        };
        assert_eq!(search.fire(first), None);
        assert!(search.is_pending());
        assert!(search.fire(second).is_some());
        assert_eq!(search.fire(second), None);
    }

    #[test]
    fn test_empty_response_shows_no_results() {
        let mut search = LiveSearch::new(SearchConfig::default());
        assert_eq!(search.complete(Ok(Vec::new())), &ResultsView::NoResults);
        assert!(search.view().is_visible());
    }

    #[test]
    fn test_items_are_rendered() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let items = vec![item("Laptop 14", "Asset"), item("Lapland Ltd", "Supplier")];
        assert_eq!(
            search.complete(Ok(items.clone())),
            &ResultsView::Items(items)
        );
    }

    #[test]
    fn test_failure_shows_failed_row() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let view = search.complete(Err(WidgetError::Search("HTTP 500".to_string())));
        assert_eq!(view, &ResultsView::Failed);
    }

    #[test]
    fn test_outside_click_hides_while_request_in_flight() {
        let mut search = LiveSearch::new(SearchConfig::default());
        let mut clock = VirtualClock::new();

        clock.type_text(&mut search, "lap");
        clock.advance(&mut search, 300);
        search.complete(Ok(vec![item("Laptop 14", "Asset")]));
        clock.type_text(&mut search, "lapt");
        clock.advance(&mut search, 300);
        assert_eq!(search.in_flight(), 1);

        assert_eq!(search.dismiss(), &ResultsView::Hidden);
        assert_eq!(search.in_flight(), 1);

        // The late response still lands.
        search.complete(Ok(vec![item("Laptop 15", "Asset")]));
        assert!(search.view().is_visible());
        assert_eq!(search.in_flight(), 0);
    }

    #[test]
    fn test_custom_min_length_and_delay() {
        let config = SearchConfig {
            min_query_len: 3,
            debounce_ms: 150,
            endpoint: "/search".to_string(),
            ..SearchConfig::default()
        };
        let mut search = LiveSearch::new(config);
        assert_eq!(search.keyup("ab"), KeyOutcome::Cleared);
        let KeyOutcome::Scheduled { ticket, delay_ms } = search.keyup("abc") else {
            panic!("expected a scheduled search");
        };
        assert_eq!(delay_ms, 150);
        assert_eq!(search.fire(ticket).unwrap().url, "/search?q=abc");
    }

    #[test]
    fn test_parse_results() {
        let body = r#"[{"name": "ThinkPad X1", "url": "/assets/7", "type": "Asset"}]"#;
        let items = parse_results(body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "ThinkPad X1");
        assert_eq!(items[0].kind, "Asset");

        assert!(parse_results("[]").unwrap().is_empty());
        assert!(matches!(
            parse_results("<html>oops</html>"),
            Err(WidgetError::Search(_))
        ));
    }
}
