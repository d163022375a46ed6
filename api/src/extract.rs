//! Request extractors
//!
//! Thin wrappers over axum's `Json` and `Query` whose rejections are rendered
//! as [`ErrorResponse`] bodies instead of plain text.

use axum::extract::{FromRequest, FromRequestParts};

use crate::models::ErrorResponse;

/// JSON body, rejected as `{error, code}`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ErrorResponse))]
pub struct ApiJson<T>(pub T);

/// Query string, rejected as `{error, code}`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ErrorResponse))]
pub struct ApiQuery<T>(pub T);
