//! Data-URI upload.

use actix_web::{HttpResponse, web};

use glance_core::domain::MediaKind;
use glance_shared::{UploadRequest, UploadResponse};

use crate::datauri;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/upload
///
/// Audio is reported with resource type `video`, as media CDNs do.
pub async fn upload(
    state: web::Data<AppState>,
    body: web::Json<UploadRequest>,
) -> AppResult<HttpResponse> {
    let file = datauri::parse(&body.file).map_err(AppError::BadRequest)?;
    let kind = MediaKind::from_mime(&file.mime)
        .ok_or_else(|| AppError::BadRequest(format!("Unsupported file type: {}", file.mime)))?;

    let name = state.storage.save(&file.mime, &file.bytes).await?;
    let resource_type = match kind {
        MediaKind::Image => "image",
        MediaKind::Video | MediaKind::Audio => "video",
    };
    tracing::info!(%name, mime = %file.mime, bytes = file.bytes.len(), "Upload stored");

    Ok(HttpResponse::Ok().json(UploadResponse {
        secure_url: state.media_url(&name),
        resource_type: resource_type.to_string(),
    }))
}
