//! Navbar search box with debounced live results.

use crate::components::SearchResults;
use crate::js_bridge;
use crate::state::SearchState;
use dioxus::prelude::*;
use itam_widgets_core::config::SearchConfig;

/// Search input plus result list.
///
/// Provides [`SearchState`] to its children and closes the results on any
/// click outside the input.
#[component]
pub fn GlobalSearch(config: SearchConfig) -> Element {
    let state = use_context_provider(|| SearchState::new(config.clone()));

    let input_id = config.input_id.clone();
    use_hook(move || {
        if let Err(e) = js_bridge::on_outside_click(input_id, move || state.dismiss()) {
            log::warn!("search: outside-click listener not installed: {:#}", e);
        }
    });

    let on_input = move |evt: Event<FormData>| {
        state.input(&evt.value());
    };

    rsx! {
        div {
            class: "position-relative",
            input {
                id: "{config.input_id}",
                class: "form-control",
                r#type: "search",
                placeholder: "Search...",
                autocomplete: "off",
                oninput: on_input,
            }
            SearchResults { id: config.results_id.clone() }
        }
    }
}
