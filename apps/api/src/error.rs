use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use hrdesk_core::{AccessError, AppError, RbacError};
use tracing::error;

mod types;

use types::ErrorResponse;

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl From<AccessError> for ApiError {
    fn from(value: AccessError) -> Self {
        Self(AppError::Access(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Access(AccessError::Unauthenticated(_)) => StatusCode::UNAUTHORIZED,
            AppError::Access(AccessError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            AppError::Rbac(RbacError::RoleInUse { .. } | RbacError::DuplicateAssignment { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Rbac(RbacError::UnknownRole(_) | RbacError::UnknownEmployee(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if let AppError::Internal(detail) = &self.0 {
            error!(detail = %detail, "request failed with internal error");
            "internal server error".to_owned()
        } else {
            self.0.to_string()
        };

        let mut response = (status, Json(ErrorResponse::new(message))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use hrdesk_core::{AccessError, AppError, CredentialError, RbacError};

    use super::ApiError;

    #[test]
    fn store_conflicts_split_between_bad_request_and_not_found() {
        let role_in_use = ApiError(AppError::Rbac(RbacError::RoleInUse {
            role_id: "role_manager".to_owned(),
            assignment_count: 2,
        }));
        let duplicate = ApiError(AppError::Rbac(RbacError::DuplicateAssignment {
            employee_id: "E1".to_owned(),
            role_id: "role_hr".to_owned(),
        }));
        let unknown_role = ApiError(AppError::Rbac(RbacError::UnknownRole("role_x".to_owned())));
        let unknown_employee =
            ApiError(AppError::Rbac(RbacError::UnknownEmployee("E404".to_owned())));

        assert_eq!(role_in_use.status(), StatusCode::BAD_REQUEST);
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown_role.status(), StatusCode::NOT_FOUND);
        assert_eq!(unknown_employee.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unauthenticated_and_forbidden_stay_distinct() {
        let unauthenticated = ApiError::from(AccessError::Unauthenticated(
            CredentialError::MissingCredential,
        ));
        let forbidden = ApiError::from(AccessError::Forbidden {
            subject: "bob".to_owned(),
            allowed: vec!["role_admin".to_owned()],
        });

        assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }
}
