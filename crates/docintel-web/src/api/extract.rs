use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use docintel_core::{DocumentFormat, Error as CoreError, RawDocument, StructuredRecord};
use uuid::Uuid;

use super::error::ApiError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// Text after the last `.` of the filename, lower-cased; empty when there is none.
fn extension_of(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Reads the `file` part of the upload. Other parts are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<(Option<String>, Bytes)>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_owned);
        let data = field.bytes().await?;
        return Ok(Some((filename, data)));
    }
    Ok(None)
}

pub async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StructuredRecord>, ApiError> {
    let pipeline = state.pipeline.clone().ok_or(ApiError::NotReady)?;

    let (filename, data) = match read_upload(&mut multipart).await? {
        Some((Some(filename), data)) if !filename.is_empty() => (filename, data),
        _ => return Err(ApiError::BadRequest("Filename is required".to_string())),
    };

    let extension = extension_of(&filename);
    let format = DocumentFormat::from_extension(&extension)
        .ok_or(CoreError::UnsupportedFormat(extension))?;

    if data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".to_string()));
    }

    let span = tracing::info_span!(
        "upload",
        request_id = %Uuid::new_v4(),
        filename = %filename,
        bytes = data.len()
    );
    let record = tokio::task::spawn_blocking(move || {
        let _enter = span.enter();
        pipeline.extract_document(RawDocument::new(&data, format))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(record))
}
