//! Score preview endpoint
//!
//! Same scoring as `/assess-risk`, nothing persisted.

use axum::Json;
use risk_core::{assess, validate_ratings, Assessment};

use crate::extract::ApiQuery;
use crate::models::*;

/// Preview score, level and hint for a rating pair
#[utoipa::path(
    get,
    path = "/preview",
    params(
        ("likelihood" = i64, Query, description = "Probability rating, 1-5"),
        ("impact" = i64, Query, description = "Severity rating, 1-5")
    ),
    responses(
        (status = 200, description = "Score, level and compliance hint", body = Assessment),
        (status = 400, description = "Likelihood or impact outside 1-5", body = ErrorResponse),
        (status = 422, description = "Rating missing or not an integer", body = ErrorResponse)
    ),
    tag = "risks"
)]
pub async fn preview_risk(
    ApiQuery(params): ApiQuery<PreviewQuery>,
) -> Result<Json<Assessment>, ErrorResponse> {
    let (likelihood, impact) = validate_ratings(params.likelihood.get(), params.impact.get())?;
    Ok(Json(assess(likelihood.into(), impact.into())))
}
