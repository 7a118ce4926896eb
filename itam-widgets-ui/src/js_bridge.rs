//! Typed wrappers around the JS side: Chart.js, timers, `fetch` and
//! document-level listeners.
//!
//! Chart.js is loaded by the page as a plain `<script>` and exposes the
//! global `Chart` constructor. Chart configurations are built in Rust,
//! serialized to JSON and parsed into JS objects before construction.

use crate::dom::{self, js_error, DataAttributes};
use anyhow::Context;
use itam_widgets_core::chart_config::{presets, ChartPreset, MonthLink};
use itam_widgets_core::config::{ForecastRoute, WidgetConfig};
use itam_widgets_core::search::{self, SearchItem};
use itam_widgets_core::WidgetError;
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, HtmlCanvasElement, Node, Response};

#[wasm_bindgen]
extern "C" {
    /// A Chart.js chart instance.
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(context: &JsValue, config: &JsValue) -> Result<Chart, JsValue>;
}

/// Whether the page loaded Chart.js.
pub fn chart_library_loaded() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("Chart")).unwrap_or(false)
}

/// Draw every known chart whose canvas is on the page.
///
/// A chart with unreadable data is logged and skipped; the others still render.
pub fn init_charts(config: &WidgetConfig) {
    if !chart_library_loaded() {
        log::warn!("chart: Chart.js is not loaded, skipping charts");
        return;
    }

    for preset in presets() {
        let Some(canvas) = dom::element_by_id::<HtmlCanvasElement>(preset.canvas_id) else {
            continue;
        };
        match render_chart(&preset, &canvas, config.forecast_route) {
            Ok(()) => log::info!("chart: rendered {}", preset.canvas_id),
            Err(e) => log::error!("chart: {} failed: {:#}", preset.canvas_id, e),
        }
    }
}

fn render_chart(
    preset: &ChartPreset,
    canvas: &HtmlCanvasElement,
    route: ForecastRoute,
) -> anyhow::Result<()> {
    let config = preset.build(&DataAttributes(canvas), route)?;
    let js_config = js_sys::JSON::parse(&config.to_json()?).map_err(js_error)?;

    if let Some(link) = config.month_link {
        let keys = config.data.keys.clone().unwrap_or_default();
        attach_month_link(&js_config, link, keys)?;
    }

    let context = canvas
        .get_context("2d")
        .map_err(js_error)?
        .context("canvas has no 2d context")?;
    Chart::new(&context, &js_config).map_err(js_error)?;
    Ok(())
}

/// Install `options.onClick`: a click on a bar navigates to the listing
/// filtered by that bar's month key.
fn attach_month_link(js_config: &JsValue, link: MonthLink, keys: Vec<String>) -> anyhow::Result<()> {
    let options = Reflect::get(js_config, &JsValue::from_str("options")).map_err(js_error)?;

    let on_click = Closure::<dyn FnMut(JsValue, Array)>::new(move |_event: JsValue, elements: Array| {
        if elements.length() == 0 {
            return;
        }
        let index = Reflect::get(&elements.get(0), &JsValue::from_str("index"))
            .ok()
            .and_then(|v| v.as_f64());
        if let Some(url) = index.and_then(|i| link.url_for(&keys, i as usize)) {
            navigate(&url);
        }
    });

    Reflect::set(&options, &JsValue::from_str("onClick"), on_click.as_ref()).map_err(js_error)?;
    // The chart lives as long as the page.
    on_click.forget();
    Ok(())
}

pub fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        log::error!("navigation to {} failed: {:?}", url, e);
    }
}

/// Resolve after `ms` milliseconds (`setTimeout`).
pub async fn sleep(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// GET `url` and return the response body as text.
pub async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    let body = JsFuture::from(response.text()?).await?;
    Ok(body.as_string().unwrap_or_default())
}

/// GET a search URL and parse the result items.
pub async fn fetch_search_results(url: &str) -> itam_widgets_core::Result<Vec<SearchItem>> {
    let body = fetch_text(url)
        .await
        .map_err(|e| WidgetError::Search(format!("{:?}", e)))?;
    search::parse_results(&body)
}

/// Call `handler` for every click on the page outside the element with the
/// given id. The listener stays installed for the page lifetime.
pub fn on_outside_click<F>(element_id: String, mut handler: F) -> anyhow::Result<()>
where
    F: FnMut() + 'static,
{
    let document = dom::document().context("no document")?;

    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside = match (dom::element_by_id::<Element>(&element_id), target) {
            (Some(element), Some(target)) => element.contains(Some(&target)),
            _ => false,
        };
        if !inside {
            handler();
        }
    });

    document
        .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .map_err(js_error)?;
    listener.forget();
    Ok(())
}
