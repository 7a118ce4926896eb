//! ITAM page widgets
//!
//! One WASM bundle loaded by every page of the application. Each widget
//! attaches only if its placeholder is on the page:
//!
//! 1. `exportTableToCSV(tableId, filename)` is set on `window` for the
//!    listing pages' export buttons.
//! 2. Every known chart canvas (`forecastChart`, `costHistoryChart`, ...)
//!    is drawn with Chart.js from its `data-*` attributes.
//! 3. The live search box is mounted into `#global-search`.

use dioxus::prelude::*;
use itam_widgets_core::config::WidgetConfig;
use itam_widgets_ui::components::GlobalSearch;
use itam_widgets_ui::{csv_download, dom, js_bridge};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");

    // window.exportTableToCSV comes from here; the wasm export alone is only
    // visible to the module loader.
    if let Err(e) = csv_download::install_global() {
        log::error!("csv: exportTableToCSV not installed: {:#}", e);
    }

    let config = dom::load_config();
    js_bridge::init_charts(&config);

    let root_id = config.search.root_id.clone();
    if !dom::element_exists(&root_id) {
        log::info!("search: no #{} on this page, live search disabled", root_id);
        return;
    }

    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname(root_id))
        .with_context(config)
        .launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context::<WidgetConfig>();

    rsx! {
        GlobalSearch { config: config.search.clone() }
    }
}
