//! Result list below the search input.

use crate::state::SearchState;
use dioxus::prelude::*;
use itam_widgets_core::search::{ResultsView, SearchItem};

#[derive(Props, Clone, PartialEq)]
pub struct SearchResultsProps {
    /// DOM id of the list element
    pub id: String,
}

/// Renders the current [`ResultsView`]; hidden when there is nothing to show.
#[component]
pub fn SearchResults(props: SearchResultsProps) -> Element {
    let state = use_context::<SearchState>();
    let view = state.search.read().view().clone();
    let display = if view.is_visible() { "block" } else { "none" };

    rsx! {
        div {
            id: "{props.id}",
            class: "list-group position-absolute w-100 shadow",
            style: "display: {display}; z-index: 1050;",
            {match view {
                ResultsView::Hidden => rsx! {},
                ResultsView::Items(items) => rsx! {
                    for item in items {
                        SearchResultRow { item }
                    }
                },
                ResultsView::NoResults => rsx! {
                    span {
                        class: "list-group-item disabled text-muted",
                        "No results found"
                    }
                },
                ResultsView::Failed => rsx! {
                    div {
                        class: "list-group-item disabled text-danger",
                        "Search failed"
                    }
                },
            }}
        }
    }
}

/// One result: the name, with the entity type as a badge.
#[component]
pub fn SearchResultRow(item: SearchItem) -> Element {
    rsx! {
        a {
            href: "{item.url}",
            class: "list-group-item list-group-item-action py-2",
            "{item.name} "
            span {
                class: "badge bg-secondary float-end",
                "{item.kind}"
            }
        }
    }
}
