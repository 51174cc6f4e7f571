use actix_web::{HttpResponse, web};

use glance_core::domain::mime_for_extension;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /media/{name}
pub async fn serve(state: web::Data<AppState>, name: web::Path<String>) -> AppResult<HttpResponse> {
    let name = name.into_inner();
    let bytes = state
        .storage
        .load(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No media named {name}")))?;

    Ok(HttpResponse::Ok()
        .content_type(mime_for_extension(&name))
        .body(bytes))
}
