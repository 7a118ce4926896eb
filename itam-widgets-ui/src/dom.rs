//! Small helpers over `web-sys` DOM access.

use itam_widgets_core::chart_data::AttributeSource;
use itam_widgets_core::config::{WidgetConfig, CONFIG_ATTRIBUTE};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Look up an element by id and cast it to the expected element type.
pub fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn element_exists(id: &str) -> bool {
    document()
        .and_then(|d| d.get_element_by_id(id))
        .is_some()
}

/// All descendants of `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(e) => {
            log::warn!("querySelectorAll('{}') failed: {:?}", selector, e);
            Vec::new()
        }
    }
}

/// Rendered text of an element (`innerText`), falling back to
/// `textContent` for non-HTML elements.
pub fn inner_text(element: &Element) -> String {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.inner_text(),
        None => element.text_content().unwrap_or_default(),
    }
}

/// Exposes an element's attributes to the chart data parsers.
pub struct DataAttributes<'a>(pub &'a Element);

impl AttributeSource for DataAttributes<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

/// Read the widget configuration from `<body data-widget-config>`.
/// Falls back to the defaults when the attribute is malformed.
pub fn load_config() -> WidgetConfig {
    let raw = document()
        .and_then(|d| d.body())
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));

    match WidgetConfig::from_attribute(raw.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using default widget configuration", e);
            WidgetConfig::default()
        }
    }
}

/// Turn a thrown JS value into an error message.
pub fn js_error(value: JsValue) -> anyhow::Error {
    match value.as_string() {
        Some(message) => anyhow::anyhow!(message),
        None => anyhow::anyhow!("{:?}", value),
    }
}
