//! CSV download for listing tables.
//!
//! Listing templates call `exportTableToCSV('assets-table', 'assets.csv')`
//! from their export buttons. The function is exported under that name and,
//! since the bundle is loaded as an ES module, also promoted to `window` by
//! [`install_global`].

use crate::dom::{self, js_error};
use anyhow::Context;
use itam_widgets_core::csv_export::{csv_data_uri, TableSnapshot, EXPORT_GLOBAL};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Export the table with the given id and start a download named `filename`.
///
/// Never throws: a missing table or a failed download is only logged.
#[wasm_bindgen(js_name = exportTableToCSV)]
pub fn export_table_to_csv(table_id: &str, filename: &str) {
    let Some(table) = dom::element_by_id::<Element>(table_id) else {
        log::error!("Table with id \"{}\" not found.", table_id);
        return;
    };

    match download_csv(&table, filename) {
        Ok(()) => log::info!("csv: exported \"{}\" as {}", table_id, filename),
        Err(e) => log::error!("csv: export of \"{}\" failed: {:#}", table_id, e),
    }
}

/// Promote the exporter to `window.exportTableToCSV` so inline `onclick`
/// handlers in the templates can reach it. Call once at startup.
pub fn install_global() -> anyhow::Result<()> {
    let window = web_sys::window().context("no window")?;
    let export = Closure::<dyn Fn(String, String)>::new(|table_id: String, filename: String| {
        export_table_to_csv(&table_id, &filename);
    });
    js_sys::Reflect::set(&window, &JsValue::from_str(EXPORT_GLOBAL), export.as_ref())
        .map_err(js_error)?;
    // Stays callable for the page lifetime.
    export.forget();
    Ok(())
}

/// Read header and body cell texts of a table.
pub fn snapshot_table(table: &Element) -> TableSnapshot {
    let headers = dom::query_all(table, "thead th")
        .iter()
        .map(dom::inner_text)
        .collect();

    let rows = dom::query_all(table, "tbody tr")
        .iter()
        .map(|row| {
            dom::query_all(row, "td")
                .iter()
                .map(dom::inner_text)
                .collect()
        })
        .collect();

    TableSnapshot::new(headers, rows)
}

fn download_csv(table: &Element, filename: &str) -> anyhow::Result<()> {
    let csv = snapshot_table(table).to_csv()?;
    let href: String = js_sys::encode_uri(&csv_data_uri(&csv)).into();

    let document = dom::document().context("no document")?;
    let body = document.body().context("document has no body")?;

    // Temporary link, clicked once and removed again.
    let link = document.create_element("a").map_err(js_error)?;
    link.set_attribute("href", &href).map_err(js_error)?;
    link.set_attribute("download", filename).map_err(js_error)?;
    body.append_child(&link).map_err(js_error)?;
    if let Some(anchor) = link.dyn_ref::<HtmlElement>() {
        anchor.click();
    }
    body.remove_child(&link).map_err(js_error)?;

    Ok(())
}
