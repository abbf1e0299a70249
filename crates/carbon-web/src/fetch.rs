use carbon_core::analysis::AnalysisResult;
use carbon_core::client::{interpret_response, ClientError, FILE_FIELD, UPLOAD_ENDPOINT};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

fn transport(e: JsValue) -> ClientError {
    ClientError::Transport(crate::dom::describe(&e))
}

/// POST the file as `multipart/form-data` to the upload endpoint.
pub async fn upload(file: &File) -> Result<AnalysisResult, ClientError> {
    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(transport)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form.into());
    let request = Request::new_with_str_and_init(UPLOAD_ENDPOINT, &init).map_err(transport)?;

    let window = crate::dom::window().map_err(transport)?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;

    let status = response.status();
    let text = JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();

    interpret_response(status, &text)
}
