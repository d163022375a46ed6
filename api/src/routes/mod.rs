//! API Routes

pub mod analytics;
pub mod health;
pub mod preview;
pub mod risks;

use crate::models::{codes, ErrorResponse};
use risk_core::RiskResult;

/// Run a store-touching service call off the async workers.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ErrorResponse>
where
    F: FnOnce() -> RiskResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ErrorResponse::new(codes::INTERNAL_ERROR, e.to_string()))?
        .map_err(ErrorResponse::from)
}
