//! Browser-independent logic for the ITAM page widgets.
//!
//! This crate provides:
//! - `csv_export`: table snapshot to CSV text, skipping the "Actions" column
//! - `chart_data`: JSON `data-*` attribute parsing for chart placeholders
//! - `chart_config`: Chart.js configuration presets and the forecast click target
//! - `search`: the debounced live search state machine
//! - `config`: page-level widget configuration
//!
//! Nothing here touches the DOM; `itam-widgets-ui` feeds it values read from
//! the page and applies the results.

pub mod chart_config;
pub mod chart_data;
pub mod config;
pub mod csv_export;
pub mod error;
pub mod search;

pub use error::{Result, WidgetError};
