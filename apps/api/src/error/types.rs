use serde::Serialize;

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    success: bool,
    message: String,
}

impl ErrorResponse {
    pub(super) fn new(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}
