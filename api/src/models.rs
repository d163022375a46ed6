//! API Models

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use risk_core::RiskError;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Error codes carried in [`ErrorResponse::code`]
pub mod codes {
    /// Likelihood or impact outside 1..=5
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// Risk database unreachable or unwritable
    pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
    /// Body or query string could not be decoded
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    /// Anything else
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable code
    pub code: String,
}

impl ErrorResponse {
    /// Build from a code and message
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }

    /// HTTP status for the code
    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            codes::VALIDATION_ERROR => StatusCode::BAD_REQUEST,
            codes::STORAGE_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
            codes::INVALID_REQUEST => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RiskError> for ErrorResponse {
    fn from(err: RiskError) -> Self {
        match &err {
            RiskError::Validation { .. } => Self::new(codes::VALIDATION_ERROR, err.to_string()),
            RiskError::StorageUnavailable(source) => {
                tracing::error!("Risk storage failure: {}", source);
                Self::new(codes::STORAGE_UNAVAILABLE, err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(codes::INVALID_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(codes::INVALID_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Rating as sent by a client.
///
/// Any integer is accepted, whatever its magnitude, and saturated into `i64`
/// so that the range check rejects it with the fixed message. Integral floats
/// (`1e20`, `3.0`) and numeric strings (query parameters) count as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RatingInput(pub i64);

impl RatingInput {
    /// Value handed to range validation
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RatingInput {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

struct RatingVisitor;

impl<'de> Visitor<'de> for RatingVisitor {
    type Value = RatingInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer rating")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RatingInput, E> {
        Ok(RatingInput(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RatingInput, E> {
        Ok(RatingInput(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<RatingInput, E> {
        let clamped = v.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        Ok(RatingInput(clamped as i64))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<RatingInput, E> {
        Ok(RatingInput(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RatingInput, E> {
        if v.is_finite() && v.fract() == 0.0 {
            // `as` saturates at the i64 bounds
            Ok(RatingInput(v as i64))
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RatingInput, E> {
        let digits = v
            .strip_prefix('-')
            .or_else(|| v.strip_prefix('+'))
            .unwrap_or(v);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(E::invalid_value(Unexpected::Str(v), &self));
        }
        let saturated = if v.starts_with('-') { i64::MIN } else { i64::MAX };
        Ok(RatingInput(v.parse().unwrap_or(saturated)))
    }
}

impl<'de> Deserialize<'de> for RatingInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RatingVisitor)
    }
}

/// Risk assessment request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RiskCreate {
    /// Affected asset
    pub asset: String,
    /// Threat scenario
    pub threat: String,
    /// Probability rating, 1..=5
    #[schema(value_type = i64)]
    pub likelihood: RatingInput,
    /// Severity rating, 1..=5
    #[schema(value_type = i64)]
    pub impact: RatingInput,
}

/// Optional level filter
#[derive(Debug, Default, Deserialize)]
pub struct LevelQuery {
    /// Exact, case-sensitive level name
    pub level: Option<String>,
}

impl LevelQuery {
    /// Filter to apply; an empty value means no filter
    pub fn filter(&self) -> Option<&str> {
        self.level.as_deref().filter(|l| !l.is_empty())
    }
}

/// Preview parameters
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Probability rating, 1..=5
    pub likelihood: RatingInput,
    /// Severity rating, 1..=5
    pub impact: RatingInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::{StoreError, RANGE_ERROR_MESSAGE};

    #[test]
    fn test_validation_maps_to_bad_request() {
        let resp = ErrorResponse::from(RiskError::Validation { value: 0 });
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.error, RANGE_ERROR_MESSAGE);
    }

    #[test]
    fn test_storage_maps_to_unavailable() {
        let err = RiskError::StorageUnavailable(StoreError::Io(std::io::Error::other("disk gone")));
        let resp = ErrorResponse::from(err);
        assert_eq!(resp.code, codes::STORAGE_UNAVAILABLE);
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_rating_input_saturates_oversized_integers() {
        let parse = |raw: &str| serde_json::from_str::<RatingInput>(raw).map(RatingInput::get);
        assert_eq!(parse("3").unwrap(), 3);
        assert_eq!(parse("-4").unwrap(), -4);
        assert_eq!(parse("100000000000000000000").unwrap(), i64::MAX);
        assert_eq!(parse("-100000000000000000000").unwrap(), i64::MIN);
        assert_eq!(parse("18446744073709551615").unwrap(), i64::MAX);
        assert_eq!(parse("2.0").unwrap(), 2);
        assert_eq!(parse("\"99999999999999999999999\"").unwrap(), i64::MAX);
        assert!(parse("2.5").is_err());
        assert!(parse("\"three\"").is_err());
        assert!(parse("null").is_err());
    }

    #[test]
    fn test_oversized_rating_fails_range_check() {
        let input: RiskCreate = serde_json::from_str(
            r#"{"asset":"X","threat":"Y","likelihood":100000000000000000000,"impact":3}"#,
        )
        .unwrap();
        let err = risk_core::validate_ratings(input.likelihood.get(), input.impact.get()).unwrap_err();
        let resp = ErrorResponse::from(err);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.error, RANGE_ERROR_MESSAGE);
    }

    #[test]
    fn test_invalid_request_status() {
        let resp = ErrorResponse::new(codes::INVALID_REQUEST, "missing field `asset`");
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_empty_level_is_no_filter() {
        let query = LevelQuery { level: Some(String::new()) };
        assert_eq!(query.filter(), None);
        let query = LevelQuery { level: Some("High".into()) };
        assert_eq!(query.filter(), Some("High"));
    }
}
