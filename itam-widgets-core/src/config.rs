//! Page-level widget configuration.
//!
//! Pages may override the defaults by placing a JSON object in the
//! `data-widget-config` attribute of `<body>`:
//!
//! ```text
//! <body data-widget-config='{"forecastRoute": "subscriptions", "search": {"debounceMs": 250}}'>
//! ```
//!
//! Every field is optional; anything omitted keeps its default.

use crate::error::{Result, WidgetError};
use serde::{Deserialize, Serialize};

/// Name of the `<body>` attribute holding the configuration JSON.
pub const CONFIG_ATTRIBUTE: &str = "data-widget-config";

/// Configuration for all widgets on a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub search: SearchConfig,
    /// Listing that forecast chart clicks navigate to
    pub forecast_route: ForecastRoute,
}

impl WidgetConfig {
    /// Parse the configuration attribute. A missing or blank attribute yields
    /// the defaults.
    pub fn from_attribute(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => serde_json::from_str(json).map_err(WidgetError::Config),
        }
    }
}

/// Live search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Search API path; the query is appended as `?q=`
    pub endpoint: String,
    /// DOM id of the element the search component mounts into
    pub root_id: String,
    /// DOM id given to the search input
    pub input_id: String,
    /// DOM id given to the result list
    pub results_id: String,
    /// Shortest trimmed query (in UTF-16 code units) that triggers a request
    pub min_query_len: usize,
    /// Quiet period after the last keystroke before the request is sent
    pub debounce_ms: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/search".to_string(),
            root_id: "global-search".to_string(),
            input_id: "global-search-input".to_string(),
            results_id: "global-search-results".to_string(),
            min_query_len: 2,
            debounce_ms: 300,
        }
    }
}

/// Listing page filtered by the forecast chart's month keys.
///
/// The same dashboard is deployed both for service tracking and for
/// subscription tracking; only the target listing differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastRoute {
    #[default]
    Services,
    Subscriptions,
}

impl ForecastRoute {
    pub fn path(self) -> &'static str {
        match self {
            ForecastRoute::Services => "/services",
            ForecastRoute::Subscriptions => "/subscriptions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attribute_uses_defaults() {
        let config = WidgetConfig::from_attribute(None).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.search.endpoint, "/api/search");
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.forecast_route, ForecastRoute::Services);

        let blank = WidgetConfig::from_attribute(Some("   ")).unwrap();
        assert_eq!(blank, WidgetConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let raw = r#"{"forecastRoute": "subscriptions", "search": {"debounceMs": 250}}"#;
        let config = WidgetConfig::from_attribute(Some(raw)).unwrap();
        assert_eq!(config.forecast_route, ForecastRoute::Subscriptions);
        assert_eq!(config.search.debounce_ms, 250);
        // Untouched fields keep their defaults
        assert_eq!(config.search.input_id, "global-search-input");
        assert_eq!(config.search.min_query_len, 2);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let err = WidgetConfig::from_attribute(Some("{not json")).unwrap_err();
        assert!(matches!(err, WidgetError::Config(_)));
    }

    #[test]
    fn test_context_copy_keeps_overrides() {
        // The app reads its context copy instead of parsing the attribute again.
        let raw = r#"{"search": {"minQueryLen": 3, "rootId": "nav-search"}}"#;
        let loaded = WidgetConfig::from_attribute(Some(raw)).unwrap();
        let context = loaded.clone();
        assert_eq!(context, loaded);
        assert_eq!(context.search.min_query_len, 3);
        assert_eq!(context.search.root_id, "nav-search");
    }

    #[test]
    fn test_forecast_route_paths() {
        assert_eq!(ForecastRoute::Services.path(), "/services");
        assert_eq!(ForecastRoute::Subscriptions.path(), "/subscriptions");
    }
}
