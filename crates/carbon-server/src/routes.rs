use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use carbon_core::client::FILE_FIELD;
use futures_util::TryStreamExt;
use std::path::Path;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// The analysis page.
pub const INDEX_HTML: &str = include_str!("../static/index.html");

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(upload_file);
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/upload-file")]
async fn upload_file(
    req: HttpRequest,
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    if !is_multipart(&req) {
        return Err(ApiError::NoFile);
    }

    let upload = read_file_field(&mut payload, state.max_upload_bytes)
        .await?
        .ok_or(ApiError::NoFile)?;

    tracing::info!(file = %upload.file_name, bytes = upload.bytes.len(), "analyzing upload");

    if let Some(dir) = &state.upload_dir {
        let path = dir.join(stored_name(&upload.file_name));
        tokio::fs::write(&path, &upload.bytes).await?;
        tracing::debug!(path = %path.display(), "upload stored");
    }

    // workbook unzip and parsing are CPU bound; keep them off the worker's executor
    let catalog = Arc::clone(&state.catalog);
    let file_name = upload.file_name.clone();
    let analysis = web::block(move || {
        carbon_core::analyze_upload(&upload.file_name, &upload.bytes, &catalog)
    })
    .await?
    .map_err(|e| {
        tracing::warn!(file = %file_name, error = %e, "analysis rejected");
        e
    })?;

    if !analysis.skipped_values.is_empty() {
        tracing::warn!(
            file = %file_name,
            skipped = analysis.skipped_values.len(),
            "some Units_Sold cells were not numeric"
        );
    }

    Ok(HttpResponse::Ok().json(analysis.result))
}

struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Read the `file` field, skipping any others. A field without a file name
/// counts as no file (that is what a browser sends for an empty picker).
async fn read_file_field(
    payload: &mut Multipart,
    limit: usize,
) -> Result<Option<Upload>, ApiError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        if file_name.trim().is_empty() {
            return Ok(None);
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::Multipart(e.to_string()))?
        {
            if bytes.len() + chunk.len() > limit {
                return Err(ApiError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok(Some(Upload { file_name, bytes }));
    }

    Ok(None)
}

/// Final path component of a client-supplied name.
fn stored_name(file_name: &str) -> String {
    let last = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    match Path::new(last).file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => "upload".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_name_strips_directories() {
        assert_eq!(stored_name("sales.csv"), "sales.csv");
        assert_eq!(stored_name("../../etc/passwd"), "passwd");
        assert_eq!(stored_name("C:\\Users\\me\\sales.xlsx"), "sales.xlsx");
        assert_eq!(stored_name(".."), "upload");
        assert_eq!(stored_name("dir/"), "upload");
    }
}
