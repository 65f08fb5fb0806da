use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;

use premia_common::error::PremiaError;

use crate::classify::responses::ClassificationResult;
use crate::error::ApiError;
use crate::AppState;

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ClassificationResult>, ApiError> {
    let image = read_image_field(&mut multipart).await?;

    // Both models score the same bytes; neither depends on the other.
    let (body_type, make) = tokio::try_join!(
        state.vision.classify_body_type(image.clone()),
        state.vision.classify_make(image),
    )
    .map_err(|e| PremiaError::Classifier(e.to_string()))?;

    tracing::info!(
        body_type = %body_type.tag_name,
        make = %make.tag_name,
        "image classified"
    );

    Ok(Json(ClassificationResult::from_predictions(body_type, make)))
}

/// Pull the `image` field's bytes out of the multipart form.
///
/// Anything that goes wrong here folds into the uniform analysis failure;
/// this route has a single client-facing error shape.
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, PremiaError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PremiaError::Classifier(format!("multipart read failed: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| PremiaError::Classifier(format!("failed to read image field: {e}")))?;

        tracing::info!(?file_name, size = data.len(), "received image upload");
        return Ok(data);
    }

    Err(PremiaError::Classifier(
        "no image field in upload".to_owned(),
    ))
}
