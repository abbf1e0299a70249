use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAnchorElement;

/// Download `href` as `file_name` through a transient link.
pub fn trigger(href: &str, file_name: &str) -> Result<(), JsValue> {
    let document = crate::dom::document()?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let link = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()?;
    link.set_href(href);
    link.set_download(file_name);

    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Ok(())
}
