use carbon_core::analysis::AnalysisResult;
use carbon_core::client::{interpret_response, upload_url, ClientError, FILE_FIELD};
use reqwest::multipart::{Form, Part};

/// Post one file to `<server>/upload-file` and decode the reply.
pub async fn upload_file(
    http: &reqwest::Client,
    server: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<AnalysisResult, ClientError> {
    let url = upload_url(server);
    let part = Part::bytes(bytes).file_name(file_name.to_string());
    let form = Form::new().part(FILE_FIELD, part);

    tracing::debug!(%url, file_name, "uploading");
    let response = http
        .post(&url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    tracing::debug!(status, bytes = body.len(), "server replied");
    interpret_response(status, &body)
}
