//! Chart data read from `data-*` attributes of canvas placeholders.
//!
//! The server templates render each chart's data as JSON strings:
//!
//! ```text
//! <canvas id="forecastChart"
//!         data-labels='["Mar 2024", "Apr 2024"]'
//!         data-values='[120.0, 80.5]'
//!         data-keys='["2024-03", "2024-04"]'></canvas>
//! ```
//!
//! Missing `data-labels` / `data-values` attributes count as empty arrays.
//! Malformed JSON is an error for that chart.

use crate::error::{Result, WidgetError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

pub const LABELS_ATTR: &str = "data-labels";
pub const VALUES_ATTR: &str = "data-values";
pub const KEYS_ATTR: &str = "data-keys";
pub const VALUES_ORIGINAL_ATTR: &str = "data-values-original";
pub const VALUES_DEPRECIATED_ATTR: &str = "data-values-depreciated";

/// Anything that can hand out attribute values by name.
///
/// Implemented by the browser layer for DOM elements and by a plain map for
/// tests.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Numeric series: one flat array, or one array per dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SeriesValues {
    Single(Vec<f64>),
    Grouped(Vec<Vec<f64>>),
}

impl Default for SeriesValues {
    fn default() -> Self {
        SeriesValues::Single(Vec::new())
    }
}

impl SeriesValues {
    /// The values as a list of series.
    pub fn into_series(self) -> Vec<Vec<f64>> {
        match self {
            SeriesValues::Single(values) => vec![values],
            SeriesValues::Grouped(series) => series,
        }
    }
}

/// Labels, values and optional navigation keys of a single-series chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartAttributes {
    /// Axis or segment labels. Kept as raw JSON since yearly charts use
    /// plain numbers.
    pub labels: Vec<serde_json::Value>,
    pub values: SeriesValues,
    /// Parallel to `labels`; used to resolve clicks to filter values
    pub keys: Option<Vec<String>>,
}

impl ChartAttributes {
    pub fn read<S: AttributeSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            labels: parse_or_empty(source, LABELS_ATTR)?,
            values: parse_or_default(source, VALUES_ATTR)?,
            keys: parse_optional(source, KEYS_ATTR)?,
        })
    }
}

/// Two parallel series sharing one label array (original vs. depreciated
/// value per location).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedAttributes {
    pub labels: Vec<serde_json::Value>,
    pub original: Vec<f64>,
    pub depreciated: Vec<f64>,
}

impl GroupedAttributes {
    pub fn read<S: AttributeSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self {
            labels: parse_or_empty(source, LABELS_ATTR)?,
            original: parse_or_empty(source, VALUES_ORIGINAL_ATTR)?,
            depreciated: parse_or_empty(source, VALUES_DEPRECIATED_ATTR)?,
        })
    }
}

fn parse_optional<T, S>(source: &S, name: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: AttributeSource + ?Sized,
{
    source
        .attribute(name)
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| WidgetError::AttributeJson {
                attribute: name.to_string(),
                source,
            })
        })
        .transpose()
}

fn parse_or_default<T, S>(source: &S, name: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: AttributeSource + ?Sized,
{
    Ok(parse_optional(source, name)?.unwrap_or_default())
}

fn parse_or_empty<T, S>(source: &S, name: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: AttributeSource + ?Sized,
{
    parse_or_default(source, name)
}
