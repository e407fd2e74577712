//! Request extractors whose rejections use the API error body
//!
//! axum's own `Json`, `Query` and `Path` answer malformed input with a plain
//! text body (and 422 for JSON that parses but does not fit the type). These
//! wrappers route the rejection through [`ApiError`] so every client error is
//! a `{code, message}` 400.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
