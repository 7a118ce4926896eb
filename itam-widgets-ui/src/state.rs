//! Live search state managed via Dioxus context.
//!
//! `SearchState` bundles the search signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<SearchState>()`.

use crate::js_bridge;
use dioxus::core::Task;
use dioxus::prelude::*;
use itam_widgets_core::config::SearchConfig;
use itam_widgets_core::search::{DebounceTicket, KeyOutcome, LiveSearch};

#[derive(Clone, Copy)]
pub struct SearchState {
    /// Debounce and result state machine
    pub search: Signal<LiveSearch>,
    /// Pending debounce timer task, if any
    pub debounce: Signal<Option<Task>>,
}

impl SearchState {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            search: Signal::new(LiveSearch::new(config)),
            debounce: Signal::new(None),
        }
    }

    /// Handle a new input value: drop the pending timer and, for long enough
    /// queries, start a new one.
    pub fn input(mut self, value: &str) {
        if let Some(task) = self.debounce.write().take() {
            task.cancel();
        }

        let outcome = self.search.write().keyup(value);
        if let KeyOutcome::Scheduled { ticket, delay_ms } = outcome {
            let task = spawn(async move {
                self.fire_after(ticket, delay_ms).await;
            });
            self.debounce.set(Some(task));
        }
    }

    async fn fire_after(mut self, ticket: DebounceTicket, delay_ms: u32) {
        js_bridge::sleep(delay_ms).await;

        let request = self.search.write().fire(ticket);
        let Some(request) = request else {
            return;
        };

        // Separate task so a later keystroke cancelling the timer leaves the
        // request running.
        spawn(async move {
            let result = js_bridge::fetch_search_results(&request.url).await;
            self.search.write().complete(result);
        });
    }

    /// Hide the results after a click elsewhere on the page.
    pub fn dismiss(mut self) {
        self.search.write().dismiss();
    }
}
