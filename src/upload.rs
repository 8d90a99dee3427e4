//! Avatar image uploads, standalone or as part of an employee form.
//!
//! Files land in the configured uploads directory under a generated name
//! and are served back from `/uploads/<filename>`. Nothing removes files
//! that no employee or profile refers to any more.

use crate::config::Config;
use crate::entities::employee::EmployeeInput;
use crate::errors::ApiError;
use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum avatar size (5MB)
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for the upload route: the file plus multipart framing.
pub const BODY_LIMIT: usize = MAX_AVATAR_BYTES + 64 * 1024;

pub const TOO_LARGE_MESSAGE: &str = "File too large. Maximum size is 5MB.";
pub const WRONG_TYPE_MESSAGE: &str = "Only image files are allowed!";
pub const MISSING_FILE_MESSAGE: &str = "No file uploaded";

const FIELD_NAME: &str = "avatar";
const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];
const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    /// Path the file is served from, `/uploads/<filename>`.
    pub url: String,
}

/// Lower-cased extension of `filename`, if it is an accepted image type and
/// `content_type` agrees.
fn accepted_extension(filename: &str, content_type: Option<&str>) -> Option<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)?;
    let mime = content_type?.to_ascii_lowercase();
    (ALLOWED_EXTENSIONS.contains(&ext.as_str()) && ALLOWED_MIME_TYPES.contains(&mime.as_str()))
        .then_some(ext)
}

fn stored_name(ext: &str) -> String {
    format!(
        "avatar-{}-{}.{ext}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// Validates one multipart file field and writes it to `uploads_dir`,
/// returning the stored file name.
async fn store_avatar(mut field: Field<'_>, uploads_dir: &Path) -> Result<String, ApiError> {
    let Some(original_name) = field.file_name().map(str::to_string) else {
        return Err(ApiError::upload(MISSING_FILE_MESSAGE));
    };
    let ext = accepted_extension(&original_name, field.content_type())
        .ok_or_else(|| ApiError::upload(WRONG_TYPE_MESSAGE))?;

    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if data.len() + chunk.len() > MAX_AVATAR_BYTES {
            return Err(ApiError::upload(TOO_LARGE_MESSAGE));
        }
        data.extend_from_slice(&chunk);
    }
    if data.is_empty() {
        return Err(ApiError::upload(MISSING_FILE_MESSAGE));
    }

    let filename = stored_name(&ext);
    let path = uploads_dir.join(&filename);
    tokio::fs::write(&path, &data).await.map_err(|e| {
        ApiError::internal(
            "Failed to store uploaded file",
            Some(format!("{}: {e}", path.display())),
        )
    })?;
    tracing::info!(%filename, bytes = data.len(), original = %original_name, "Avatar stored");
    Ok(filename)
}

pub async fn upload_avatar(
    State(config): State<Arc<Config>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FIELD_NAME) {
            continue;
        }
        let filename = store_avatar(field, &config.uploads_dir).await?;
        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            url: format!("/uploads/{filename}"),
            filename,
        }));
    }

    Err(ApiError::upload(MISSING_FILE_MESSAGE))
}

/// Reads an employee submitted as `multipart/form-data`.
///
/// Text parts become payload fields. An `avatar` file part is checked and
/// stored like a standalone upload and its generated name replaces the
/// `avatar` field; a file input left empty is ignored.
///
/// # Errors
///
/// Upload errors for a bad avatar, `BadRequest` for malformed form values.
pub async fn employee_form(
    mut multipart: Multipart,
    uploads_dir: &Path,
) -> Result<EmployeeInput, ApiError> {
    let mut fields = serde_json::Map::new();
    let mut avatar = None;
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == FIELD_NAME && field.file_name().is_some() {
            if field.file_name() != Some("") {
                avatar = Some(store_avatar(field, uploads_dir).await?);
            }
            continue;
        }
        fields.insert(name, Value::String(field.text().await?));
    }
    if let Some(avatar) = avatar {
        fields.insert(FIELD_NAME.to_string(), Value::String(avatar));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::bad_request(format!("Invalid employee form: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_types() {
        assert_eq!(
            accepted_extension("me.PNG", Some("image/png")),
            Some("png".to_string())
        );
        assert_eq!(
            accepted_extension("me.jpg", Some("image/jpeg")),
            Some("jpg".to_string())
        );
    }

    #[test]
    fn test_rejected_types() {
        assert_eq!(accepted_extension("notes.txt", Some("text/plain")), None);
        // both the extension and the declared type must be images
        assert_eq!(accepted_extension("me.png", Some("text/plain")), None);
        assert_eq!(accepted_extension("me.exe", Some("image/png")), None);
        assert_eq!(accepted_extension("me.png", None), None);
        assert_eq!(accepted_extension("noextension", Some("image/png")), None);
    }

    #[test]
    fn test_stored_name_shape() {
        let name = stored_name("gif");
        assert!(name.starts_with("avatar-"));
        assert!(name.ends_with(".gif"));
        assert_eq!(name.split('-').count(), 3);
    }
}
