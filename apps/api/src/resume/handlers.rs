use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::models::CandidateProfile;
use crate::state::AppState;

/// Lower-case extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub profile: CandidateProfile,
}

struct Upload {
    filename: String,
    extension: String,
    data: Bytes,
}

/// POST /resume/upload
///
/// Multipart form with a `file` field. The upload is parsed from a temporary
/// file that is removed before the response is sent.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let upload_id = Uuid::new_v4();
    let upload = read_upload(&mut multipart).await?;

    info!(
        %upload_id,
        filename = %upload.filename,
        bytes = upload.data.len(),
        "Resume upload received"
    );

    let parser = Arc::clone(&state.parser);
    let profile = tokio::task::spawn_blocking(move || -> Result<CandidateProfile, AppError> {
        let mut temp = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&format!(".{}", upload.extension))
            .tempfile()
            .context("Failed to create temporary upload file")?;
        temp.write_all(&upload.data)
            .and_then(|_| temp.flush())
            .context("Failed to write temporary upload file")?;

        let profile = parser.parse_resume(temp.path())?;

        if let Err(e) = temp.close() {
            warn!(%upload_id, error = %e, "Failed to remove temporary upload file");
        }
        Ok(profile)
    })
    .await
    .context("Resume parsing task failed")??;

    info!(%upload_id, skills = profile.skills.len(), "Resume upload parsed");
    Ok(Json(UploadResponse { profile }))
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = sanitize_filename(field.file_name().unwrap_or_default())?;
        let extension = allowed_extension(&filename)?;
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(Upload {
            filename,
            extension,
            data,
        });
    }

    Err(AppError::Validation("Missing file field 'file'".to_string()))
}

/// Keeps only the final path component of a client-supplied filename.
pub fn sanitize_filename(raw: &str) -> Result<String, AppError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(AppError::Validation("Filename missing".to_string()));
    }
    Ok(name.to_string())
}

/// Lower-cased extension of `filename`, if it is one we can parse.
pub fn allowed_extension(filename: &str) -> Result<String, AppError> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| AppError::UnsupportedMediaType("Unsupported file type".to_string()))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/cv.pdf").unwrap(), "cv.pdf");
        assert_eq!(sanitize_filename(r"C:\Users\me\cv.docx").unwrap(), "cv.docx");
        assert_eq!(sanitize_filename("resume.txt").unwrap(), "resume.txt");
    }

    #[test]
    fn test_sanitize_rejects_empty_names() {
        assert!(matches!(sanitize_filename(""), Err(AppError::Validation(_))));
        assert!(matches!(sanitize_filename("uploads/"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_allowed_extensions_case_insensitive() {
        assert_eq!(allowed_extension("CV.PDF").unwrap(), "pdf");
        assert_eq!(allowed_extension("cv.Docx").unwrap(), "docx");
        assert_eq!(allowed_extension("cv.doc").unwrap(), "doc");
        assert_eq!(allowed_extension("notes.txt").unwrap(), "txt");
    }

    #[test]
    fn test_disallowed_extensions_are_unsupported() {
        for name in ["cv.exe", "cv", "cv.pdf.zip", ".pdf"] {
            assert!(
                matches!(allowed_extension(name), Err(AppError::UnsupportedMediaType(_))),
                "{name} should be rejected"
            );
        }
    }
}
