use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tracing::warn;

use chapterino_core::{
    sanitize_title, ActivationBytes, ConversionRequest, PipelineError, ProbeError, TranscodeError,
};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn server_error(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Missing tools are a server-side problem; everything else is the uploaded
/// container's (or the key's) fault.
fn pipeline_status(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Probe(ProbeError::ToolMissing { .. })
        | PipelineError::Transcode(TranscodeError::ToolMissing { .. })
        | PipelineError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Filesystem-safe stem of the uploaded file name, used to label the
/// output directory and the returned archive.
fn book_stem(file_name: &str) -> String {
    sanitize_title(
        Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("audiobook"),
    )
}

/// Multipart form: `container` (the .aax upload), `activation_bytes` and an
/// optional `quality` override. Responds with the chapter zip as an
/// attachment; the request-scoped workspace is torn down when the request
/// ends.
pub async fn convert(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut file_name: Option<String> = None;
    let mut container_bytes: Option<axum::body::Bytes> = None;
    let mut activation_bytes: Option<String> = None;
    let mut quality: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("invalid multipart request: {}", e)),
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("container") => {
                file_name = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => container_bytes = Some(bytes),
                    Err(e) => return bad_request(format!("failed to read upload: {}", e)),
                }
            }
            Some("activation_bytes") => match field.text().await {
                Ok(text) => activation_bytes = Some(text.trim().to_string()),
                Err(e) => return bad_request(format!("failed to read activation bytes: {}", e)),
            },
            Some("quality") => match field.text().await {
                Ok(text) => quality = Some(text.trim().to_string()),
                Err(e) => return bad_request(format!("failed to read quality: {}", e)),
            },
            _ => {}
        }
    }

    let Some(container_bytes) = container_bytes else {
        return bad_request("missing container file field");
    };
    let file_name = file_name.unwrap_or_default();
    if !file_name.to_lowercase().ends_with(".aax") {
        return bad_request("file must have .aax extension");
    }

    let key = match activation_bytes.as_deref().filter(|v| !v.is_empty()) {
        Some(raw) => match raw.parse::<ActivationBytes>() {
            Ok(key) => key,
            Err(_) => return bad_request("activation bytes must be 8 hex characters"),
        },
        None => match state.config().audible.activation_bytes.clone() {
            Some(key) => key,
            None => return bad_request("missing activation_bytes field"),
        },
    };

    let mut profile = state.config().output.profile.clone();
    if let Some(quality) = quality.filter(|q| !q.is_empty()) {
        profile.vbr_quality = quality;
    }

    let workspace = match TempDir::new() {
        Ok(dir) => dir,
        Err(e) => return server_error(format!("failed to create workspace: {}", e)),
    };

    let stem = book_stem(&file_name);
    let book_name = format!("{}_chapters_{}", stem, profile.format.extension());

    let container_path = workspace.path().join(format!("{}.aax", stem));
    if let Err(e) = tokio::fs::write(&container_path, &container_bytes).await {
        return server_error(format!("failed to persist upload: {}", e));
    }

    let request = ConversionRequest {
        container: container_path,
        key,
        output_dir: workspace.path().join(&book_name),
        profile,
    };
    let archive_path = workspace.path().join(format!("{}.zip", book_name));

    let outcome = match state
        .pipeline()
        .convert_and_archive(&request, &archive_path)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("conversion failed: {}", e);
            return (
                pipeline_status(&e),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let zip_bytes = match tokio::fs::read(&outcome.archive.archive_path).await {
        Ok(bytes) => bytes,
        Err(e) => return server_error(format!("failed to read archive: {}", e)),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.zip\"", book_name),
            ),
        ],
        zip_bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chapterino_core::ArchiveError;
    use std::path::PathBuf;

    #[test]
    fn test_book_stem_sanitizes_uploaded_names() {
        assert_eq!(book_stem("My Book.aax"), "My_Book");
        assert_eq!(book_stem("../../etc/passwd.aax"), "passwd");
        assert_eq!(book_stem(""), "audiobook");
    }

    #[test]
    fn test_pipeline_status_mapping() {
        let missing_tool = PipelineError::Probe(ProbeError::ToolMissing {
            tool: PathBuf::from("ffprobe"),
        });
        assert_eq!(
            pipeline_status(&missing_tool),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let bad_container = PipelineError::Probe(ProbeError::Failed {
            stderr: "invalid data".to_string(),
        });
        assert_eq!(
            pipeline_status(&bad_container),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let chapter_failed = PipelineError::Transcode(TranscodeError::ChapterFailed {
            chapter_index: 3,
            stderr: "decode error".to_string(),
        });
        assert_eq!(
            pipeline_status(&chapter_failed),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let archive_failed = PipelineError::Archive(ArchiveError::SourceInvalid {
            path: PathBuf::from("/gone"),
        });
        assert_eq!(
            pipeline_status(&archive_failed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
