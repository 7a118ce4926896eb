//! Dioxus RSX components for the live search box.

mod global_search;
mod search_results;

pub use global_search::GlobalSearch;
pub use search_results::{SearchResultRow, SearchResults};
