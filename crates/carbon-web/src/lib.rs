pub mod chart;
pub mod dom;
pub mod download;
pub mod fetch;
pub mod page;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // nothing to wire outside the analysis page (test runners, workers)
    if !dom::has_id("fileInput") {
        return Ok(());
    }
    // The page lives for the whole document; listeners keep it alive.
    let _page = page::Page::mount()?;
    Ok(())
}
