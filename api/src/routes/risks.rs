//! Risk assessment and register endpoints

use axum::{extract::State, Json};
use risk_core::RiskRecord;
use std::sync::Arc;

use super::blocking;
use crate::extract::{ApiJson, ApiQuery};
use crate::{models::*, ApiState};

/// Assess and record a risk
#[utoipa::path(
    post,
    path = "/assess-risk",
    request_body = RiskCreate,
    responses(
        (status = 200, description = "Recorded risk with score and level", body = RiskRecord),
        (status = 400, description = "Likelihood or impact outside 1-5", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse),
        (status = 503, description = "Risk database unavailable", body = ErrorResponse)
    ),
    tag = "risks"
)]
pub async fn assess_risk(
    State(state): State<Arc<ApiState>>,
    ApiJson(input): ApiJson<RiskCreate>,
) -> Result<Json<RiskRecord>, ErrorResponse> {
    let service = state.service.clone();
    let record = blocking(move || {
        service.assess_risk(&input.asset, &input.threat, input.likelihood.get(), input.impact.get())
    })
    .await?;
    Ok(Json(record))
}

/// List recorded risks
#[utoipa::path(
    get,
    path = "/risks",
    params(
        ("level" = Option<String>, Query, description = "Filter by risk level (Low, Medium, High, Critical)")
    ),
    responses(
        (status = 200, description = "Risk register", body = Vec<RiskRecord>),
        (status = 503, description = "Risk database unavailable", body = ErrorResponse)
    ),
    tag = "risks"
)]
pub async fn list_risks(
    State(state): State<Arc<ApiState>>,
    ApiQuery(params): ApiQuery<LevelQuery>,
) -> Result<Json<Vec<RiskRecord>>, ErrorResponse> {
    let service = state.service.clone();
    let records = blocking(move || service.list_risks(params.filter())).await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::http::StatusCode;
    use crate::build_router;
    use axum::body::Bytes;
    use risk_core::{
        InMemoryRiskStore, NewRisk, RiskLevel, RiskService, RiskStore, StoreError, StoreResult,
        RANGE_ERROR_MESSAGE,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// In-memory store whose next insert can be made to fail
    struct FlakyStore {
        inner: InMemoryRiskStore,
        fail_next_insert: AtomicBool,
    }

    impl RiskStore for FlakyStore {
        fn insert(&self, risk: NewRisk) -> StoreResult<RiskRecord> {
            if self.fail_next_insert.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::other("database is locked")));
            }
            self.inner.insert(risk)
        }

        fn list(&self, level: Option<&str>) -> StoreResult<Vec<RiskRecord>> {
            self.inner.list(level)
        }

        fn count(&self) -> StoreResult<usize> {
            self.inner.count()
        }
    }

    async fn assess(
        server: &axum_test::TestServer,
        asset: &str,
        likelihood: i64,
        impact: i64,
    ) -> RiskRecord {
        let response = server
            .post("/assess-risk")
            .json(&json!({
                "asset": asset,
                "threat": "threat",
                "likelihood": likelihood,
                "impact": impact,
            }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    #[tokio::test]
    async fn test_assess_returns_full_record() {
        let server = test_support::server();
        let response = server
            .post("/assess-risk")
            .json(&json!({
                "asset": "Customer DB",
                "threat": "SQL Injection",
                "likelihood": 5,
                "impact": 4,
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["asset"], "Customer DB");
        assert_eq!(body["score"], 20);
        assert_eq!(body["level"], "Critical");
        assert!(body["compliance_hint"].as_str().unwrap().contains("NIST"));
        assert!(body["id"].as_i64().unwrap() >= 1);
    }

    #[tokio::test]
    async fn test_assess_rejects_out_of_range() {
        let server = test_support::server();
        for (likelihood, impact) in [(0, 3), (3, 6)] {
            let response = server
                .post("/assess-risk")
                .json(&json!({
                    "asset": "X",
                    "threat": "Y",
                    "likelihood": likelihood,
                    "impact": impact,
                }))
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: ErrorResponse = response.json();
            assert_eq!(body.error, RANGE_ERROR_MESSAGE);
            assert_eq!(body.code, codes::VALIDATION_ERROR);
        }

        let listed: Vec<RiskRecord> = server.get("/risks").await.json();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_by_level() {
        let server = test_support::server();
        assess(&server, "low", 1, 2).await;
        let high = assess(&server, "high", 3, 5).await;
        assess(&server, "critical", 5, 5).await;
        assess(&server, "medium", 3, 3).await;

        let all: Vec<RiskRecord> = server.get("/risks").await.json();
        assert_eq!(all.len(), 4);

        let filtered: Vec<RiskRecord> = server
            .get("/risks")
            .add_query_param("level", "High")
            .await
            .json();
        assert_eq!(filtered, vec![high]);
        assert_eq!(filtered[0].level, RiskLevel::High);

        let none: Vec<RiskRecord> = server
            .get("/risks")
            .add_query_param("level", "Nonexistent")
            .await
            .json();
        assert!(none.is_empty());

        let empty_filter: Vec<RiskRecord> = server
            .get("/risks")
            .add_query_param("level", "")
            .await
            .json();
        assert_eq!(empty_filter.len(), 4);
    }

    #[tokio::test]
    async fn test_assess_rejects_oversized_rating_with_range_message() {
        let server = test_support::server();
        for raw in [
            r#"{"asset":"X","threat":"Y","likelihood":100000000000000000000,"impact":3}"#,
            r#"{"asset":"X","threat":"Y","likelihood":3,"impact":-100000000000000000000}"#,
            r#"{"asset":"X","threat":"Y","likelihood":18446744073709551615,"impact":3}"#,
        ] {
            let response = server
                .post("/assess-risk")
                .bytes(Bytes::from(raw))
                .content_type("application/json")
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: ErrorResponse = response.json();
            assert_eq!(body.error, RANGE_ERROR_MESSAGE);
            assert_eq!(body.code, codes::VALIDATION_ERROR);
        }

        let listed: Vec<RiskRecord> = server.get("/risks").await.json();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_shape() {
        let server = test_support::server();
        let response = server
            .post("/assess-risk")
            .json(&json!({ "asset": "X", "likelihood": 2.5, "impact": 3 }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, codes::INVALID_REQUEST);
        assert!(!body.error.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_maps_to_unavailable() {
        let store = FlakyStore {
            inner: InMemoryRiskStore::new(),
            fail_next_insert: AtomicBool::new(true),
        };
        let service = RiskService::new(Arc::new(store));
        let server = axum_test::TestServer::new(build_router(ApiState::new(service))).unwrap();

        let response = server
            .post("/assess-risk")
            .json(&json!({
                "asset": "Customer DB",
                "threat": "SQL Injection",
                "likelihood": 5,
                "impact": 4,
            }))
            .await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, codes::STORAGE_UNAVAILABLE);

        let record = assess(&server, "Customer DB", 5, 4).await;
        assert_eq!(record.score, 20);
        let listed: Vec<RiskRecord> = server.get("/risks").await.json();
        assert_eq!(listed, vec![record]);
    }
}
