use axum::extract::{Multipart, State};
use bytes::Bytes;
use mealadapt_core::domain::{
    llm::entities::ImageInput,
    scan::{entities::ScanResult, ports::ScanService},
};
use tracing::debug;

use crate::application::{
    auth::RequiredIdentity,
    http::{
        scan::validators::{LabelScanForm, MAX_IMAGE_SIZE, accepted_image_type},
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "scan",
    summary = "Scan ingredient label",
    description = "Reads the ingredient list from a label photo and checks it against the family profile",
    request_body(content = LabelScanForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ScanResult),
        (status = 400, body = ApiErrorResponse, description = "Missing, oversized or unsupported image"),
        (status = 429, body = ApiErrorResponse, description = "Daily image scan budget exhausted")
    )
)]
pub async fn analyze_label(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    mut multipart: Multipart,
) -> Result<Response<ScanResult>, ApiError> {
    let mut image: Option<ImageInput> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let mime_type = accepted_image_type(&content_type).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Unsupported image type {:?}. Use JPEG, PNG, WEBP or HEIC",
                content_type
            ))
        })?;

        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }
        if data.is_empty() {
            return Err(ApiError::BadRequest("Image is empty".to_string()));
        }

        debug!(size = data.len(), mime_type, "label image received");
        image = Some(ImageInput {
            data,
            mime_type: mime_type.to_string(),
        });
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let result = state.service.analyze_label_image(identity, image).await?;

    Ok(Response::OK(result))
}
