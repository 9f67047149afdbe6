use super::*;

use hrdesk_application::{CreateRoleInput, UpdateRoleInput};

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .rbac_admin_service
        .list_roles(&context)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .rbac_admin_service
        .get_role(&context, &RoleKey::new(role_id)?)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    ApiJson(payload): ApiJson<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .rbac_admin_service
        .create_role(
            &context,
            CreateRoleInput {
                role_id: RoleKey::new(payload.role_id)?,
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(role_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .rbac_admin_service
        .update_role(
            &context,
            &RoleKey::new(role_id)?,
            UpdateRoleInput {
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(role_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .rbac_admin_service
        .delete_role(&context, &RoleKey::new(role_id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
