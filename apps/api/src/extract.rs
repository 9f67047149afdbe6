use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor that reports malformed payloads in the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
