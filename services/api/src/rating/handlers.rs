use axum::extract::State;
use axum::Json;

use premia_common::error::PremiaError;
use premia_db::rating::repositories::RatingRepository;

use crate::error::ApiError;
use crate::rating::requests::CalculateRequest;
use crate::rating::responses::RatingFactors;
use crate::AppState;

pub async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Result<Json<RatingFactors>, ApiError> {
    tracing::info!(body_type = %req.body_type, make = %req.make, "rating lookup");

    // Two independent point queries; each checks out its own pool connection.
    let (multiple, base_premium) = tokio::try_join!(
        state.rating_repo.multiple_for_make(&req.make),
        state.rating_repo.premium_for_body_type(&req.body_type),
    )?;

    match (base_premium, multiple) {
        (Some(base_premium), Some(multiple)) => Ok(Json(RatingFactors {
            base_premium,
            multiple,
        })),
        _ => Err(PremiaError::NotFound(
            "Make or body type not found in database".to_owned(),
        )
        .into()),
    }
}
