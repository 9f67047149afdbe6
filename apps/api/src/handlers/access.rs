use axum::Json;
use axum::extract::Extension;
use hrdesk_core::AccessContext;

use crate::dto::AccessContextResponse;

pub async fn my_access_handler(
    Extension(context): Extension<AccessContext>,
) -> Json<AccessContextResponse> {
    Json(AccessContextResponse::from(&context))
}
