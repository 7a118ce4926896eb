//! Chart.js configuration for the dashboard and report charts.
//!
//! Each [`ChartPreset`] pairs a canvas id with a chart type, a dataset style
//! template and the chart options. [`ChartPreset::build`] merges the data read
//! from the canvas attributes into the template and yields a [`ChartConfig`]
//! whose JSON form is passed straight to `new Chart(ctx, config)`.

use crate::chart_data::{AttributeSource, ChartAttributes, GroupedAttributes};
use crate::config::ForecastRoute;
use crate::error::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Chart.js chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Pie,
    Bar,
    Line,
}

/// A single colour or one colour per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    Palette(Vec<String>),
}

/// Styling shared by every data point of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    pub label: String,
    pub background_color: Paint,
    pub border_color: String,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

impl DatasetStyle {
    fn solid(label: &str, background: &str, border: &str, border_width: u32) -> Self {
        Self {
            label: label.to_string(),
            background_color: Paint::Solid(background.to_string()),
            border_color: border.to_string(),
            border_width,
            tension: None,
            fill: None,
        }
    }

    /// Smoothed line with the area underneath filled.
    fn filled_line(label: &str, fill_color: &str, line_color: &str) -> Self {
        Self {
            tension: Some(0.3),
            fill: Some(true),
            ..Self::solid(label, fill_color, line_color, 2)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(flatten)]
    pub style: DatasetStyle,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<Value>,
    pub datasets: Vec<Dataset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

/// Click behaviour installed by the browser layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLink {
    pub route: ForecastRoute,
}

impl MonthLink {
    pub fn url_for(&self, keys: &[String], index: usize) -> Option<String> {
        month_filter_url(self.route, keys, index)
    }
}

/// Full `new Chart(...)` argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
    #[serde(skip)]
    pub month_link: Option<MonthLink>,
}

impl ChartConfig {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Which attributes a preset reads its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLayout {
    /// `data-labels`, `data-values` and optional `data-keys`
    Series,
    /// `data-labels`, `data-values-original` and `data-values-depreciated`
    OriginalVsDepreciated,
}

/// A known chart placeholder and how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPreset {
    pub canvas_id: &'static str,
    pub kind: ChartKind,
    pub layout: DataLayout,
    /// Dataset templates, in series order
    pub styles: Vec<DatasetStyle>,
    pub options: Value,
    /// Clicking a bar navigates to the month listing
    pub links_months: bool,
}

impl ChartPreset {
    fn new(canvas_id: &'static str, kind: ChartKind, style: DatasetStyle, options: Value) -> Self {
        Self {
            canvas_id,
            kind,
            layout: DataLayout::Series,
            styles: vec![style],
            options,
            links_months: false,
        }
    }

    /// Read the canvas attributes and merge them into this preset.
    pub fn build<S: AttributeSource + ?Sized>(
        &self,
        source: &S,
        route: ForecastRoute,
    ) -> Result<ChartConfig> {
        let data = match self.layout {
            DataLayout::Series => {
                let attrs = ChartAttributes::read(source)?;
                ChartData {
                    labels: attrs.labels,
                    datasets: self.datasets(attrs.values.into_series()),
                    keys: attrs.keys,
                }
            }
            DataLayout::OriginalVsDepreciated => {
                let attrs = GroupedAttributes::read(source)?;
                ChartData {
                    labels: attrs.labels,
                    datasets: self.datasets(vec![attrs.original, attrs.depreciated]),
                    keys: None,
                }
            }
        };

        Ok(ChartConfig {
            kind: self.kind,
            data,
            options: self.options.clone(),
            month_link: self.links_months.then_some(MonthLink { route }),
        })
    }

    /// Pair each series with its template; extra series reuse the last one.
    fn datasets(&self, series: Vec<Vec<f64>>) -> Vec<Dataset> {
        series
            .into_iter()
            .enumerate()
            .filter_map(|(i, data)| {
                self.styles
                    .get(i)
                    .or_else(|| self.styles.last())
                    .map(|style| Dataset {
                        style: style.clone(),
                        data,
                    })
            })
            .collect()
    }
}

/// Listing URL for the month under the clicked bar, if there is one.
pub fn month_filter_url(route: ForecastRoute, keys: &[String], index: usize) -> Option<String> {
    keys.get(index)
        .filter(|key| !key.is_empty())
        .map(|key| format!("{}?month={}", route.path(), key))
}

/// All chart placeholders the pages may contain.
pub fn presets() -> Vec<ChartPreset> {
    let no_legend_from_zero = json!({
        "responsive": true,
        "scales": { "y": { "beginAtZero": true } },
        "plugins": { "legend": { "display": false } }
    });

    vec![
        ChartPreset::new(
            "spendingBySupplierChart",
            ChartKind::Doughnut,
            DatasetStyle {
                background_color: Paint::Palette(
                    ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40"]
                        .iter()
                        .map(|c| c.to_string())
                        .collect(),
                ),
                ..DatasetStyle::solid("Spending in €", "", "rgba(255, 255, 255, 0.5)", 2)
            },
            json!({
                "responsive": true,
                "plugins": { "legend": { "position": "top" } }
            }),
        ),
        ChartPreset::new(
            "servicesByTypeChart",
            ChartKind::Bar,
            DatasetStyle::solid("Number of Services", "#4BC0C0", "#4BC0C0", 1),
            json!({
                "responsive": true,
                "scales": { "y": { "beginAtZero": true, "ticks": { "stepSize": 1 } } },
                "plugins": { "legend": { "display": false } }
            }),
        ),
        ChartPreset::new(
            "monthlySpendingChart",
            ChartKind::Line,
            DatasetStyle::filled_line(
                "Spending in €",
                "rgba(54, 162, 235, 0.2)",
                "rgba(54, 162, 235, 1)",
            ),
            no_legend_from_zero.clone(),
        ),
        ChartPreset::new(
            "yearlySpendingChart",
            ChartKind::Line,
            DatasetStyle::filled_line(
                "Spending in €",
                "rgba(255, 99, 132, 0.2)",
                "rgba(255, 99, 132, 1)",
            ),
            no_legend_from_zero.clone(),
        ),
        ChartPreset {
            links_months: true,
            ..ChartPreset::new(
                "forecastChart",
                ChartKind::Bar,
                DatasetStyle::solid(
                    "Forecasted Cost in €",
                    "rgba(153, 102, 255, 0.5)",
                    "rgba(153, 102, 255, 1)",
                    1,
                ),
                no_legend_from_zero,
            )
        },
        ChartPreset::new(
            "costHistoryChart",
            ChartKind::Bar,
            DatasetStyle::solid("Cost in €", "rgba(75, 192, 192, 0.5)", "rgba(75, 192, 192, 1)", 1),
            json!({
                "responsive": true,
                "scales": { "y": { "beginAtZero": false } },
                "plugins": { "legend": { "display": false } }
            }),
        ),
        ChartPreset {
            canvas_id: "depreciationByLocationChart",
            kind: ChartKind::Bar,
            layout: DataLayout::OriginalVsDepreciated,
            styles: vec![
                DatasetStyle::solid(
                    "Original Value (€)",
                    "rgba(54, 162, 235, 0.6)",
                    "rgba(54, 162, 235, 1)",
                    1,
                ),
                DatasetStyle::solid(
                    "Depreciated Value (€)",
                    "rgba(255, 99, 132, 0.6)",
                    "rgba(255, 99, 132, 1)",
                    1,
                ),
            ],
            options: json!({
                "responsive": true,
                "scales": { "y": { "beginAtZero": true } },
                "plugins": {
                    "legend": { "position": "top" },
                    "title": {
                        "display": true,
                        "text": "Original vs. Depreciated Value by Location"
                    }
                }
            }),
            links_months: false,
        },
    ]
}

/// Look up a preset by canvas id.
pub fn preset(canvas_id: &str) -> Option<ChartPreset> {
    presets().into_iter().find(|p| p.canvas_id == canvas_id)
}
