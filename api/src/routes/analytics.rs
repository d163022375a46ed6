//! Dashboard aggregate endpoints

use axum::{extract::State, Json};
use risk_core::{Heatmap, RiskSummary};
use std::sync::Arc;

use super::blocking;
use crate::extract::ApiQuery;
use crate::{models::*, ApiState};

/// Register summary metrics
#[utoipa::path(
    get,
    path = "/risks/summary",
    params(
        ("level" = Option<String>, Query, description = "Restrict to one risk level")
    ),
    responses(
        (status = 200, description = "Totals, high/critical count and average score", body = RiskSummary),
        (status = 503, description = "Risk database unavailable", body = ErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn get_summary(
    State(state): State<Arc<ApiState>>,
    ApiQuery(params): ApiQuery<LevelQuery>,
) -> Result<Json<RiskSummary>, ErrorResponse> {
    let service = state.service.clone();
    let summary = blocking(move || service.summary(params.filter())).await?;
    Ok(Json(summary))
}

/// Likelihood x impact heatmap
#[utoipa::path(
    get,
    path = "/risks/heatmap",
    responses(
        (status = 200, description = "25 cells, likelihood rows by impact columns", body = Heatmap),
        (status = 503, description = "Risk database unavailable", body = ErrorResponse)
    ),
    tag = "analytics"
)]
pub async fn get_heatmap(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Heatmap>, ErrorResponse> {
    let service = state.service.clone();
    let heatmap = blocking(move || service.heatmap()).await?;
    Ok(Json(heatmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use serde_json::json;

    async fn seed(server: &axum_test::TestServer) {
        for (asset, likelihood, impact) in [("Customer DB", 5, 4), ("Wiki Page", 1, 1), ("CRM", 5, 4)] {
            server
                .post("/assess-risk")
                .json(&json!({
                    "asset": asset,
                    "threat": "threat",
                    "likelihood": likelihood,
                    "impact": impact,
                }))
                .await
                .assert_status_ok();
        }
    }

    #[tokio::test]
    async fn test_summary() {
        let server = test_support::server();
        let empty: RiskSummary = server.get("/risks/summary").await.json();
        assert_eq!(empty.total, 0);
        assert_eq!(empty.average_score, 0.0);

        seed(&server).await;
        let summary: RiskSummary = server.get("/risks/summary").await.json();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.high_critical, 2);
        assert!((summary.average_score - 41.0 / 3.0).abs() < 1e-9);

        let low: RiskSummary = server
            .get("/risks/summary")
            .add_query_param("level", "Low")
            .await
            .json();
        assert_eq!(low.total, 1);
    }

    #[tokio::test]
    async fn test_heatmap() {
        let server = test_support::server();
        seed(&server).await;

        let heatmap: Heatmap = server.get("/risks/heatmap").await.json();
        assert_eq!(heatmap.cells.len(), 25);
        let cell = heatmap.cell(5, 4).unwrap();
        assert_eq!(cell.count, 2);
        assert_eq!(cell.assets, vec!["Customer DB", "CRM"]);
        assert_eq!(heatmap.cell(1, 1).unwrap().count, 1);
    }
}
