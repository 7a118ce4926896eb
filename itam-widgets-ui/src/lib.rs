//! Browser glue and Dioxus components for the ITAM page widgets.
//!
//! This crate provides:
//! - `dom`: element lookup, text extraction and page configuration
//! - `csv_download`: the `exportTableToCSV` entry point used by listing pages
//! - `js_bridge`: Chart.js construction, timers and `fetch`
//! - `state`: reactive search state with Dioxus Signals
//! - `components`: the live search RSX components

pub mod components;
pub mod csv_download;
pub mod dom;
pub mod js_bridge;
pub mod state;
