use super::*;

use hrdesk_application::{CreatePermissionInput, UpdatePermissionInput};

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<PermissionListQuery>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let role_id = query
        .role_id
        .filter(|value| !value.trim().is_empty())
        .map(RoleKey::new)
        .transpose()?;

    let permissions = state
        .rbac_admin_service
        .list_permissions(&context, role_id.as_ref())
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn get_permission_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(permission_id): Path<String>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .rbac_admin_service
        .get_permission(&context, parse_uuid(&permission_id, "permission")?)
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    ApiJson(payload): ApiJson<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionResponse>)> {
    let permission = state
        .rbac_admin_service
        .create_permission(
            &context,
            CreatePermissionInput {
                role_id: RoleKey::new(payload.role_id)?,
                resource: ResourceName::new(payload.resource)?,
                action: PermissionAction::from_transport(payload.action.as_str())?,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PermissionResponse::from(permission))))
}

pub async fn update_permission_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(permission_id): Path<String>,
    ApiJson(payload): ApiJson<UpdatePermissionRequest>,
) -> ApiResult<Json<PermissionResponse>> {
    let permission = state
        .rbac_admin_service
        .update_permission(
            &context,
            parse_uuid(&permission_id, "permission")?,
            UpdatePermissionInput {
                resource: ResourceName::new(payload.resource)?,
                action: PermissionAction::from_transport(payload.action.as_str())?,
            },
        )
        .await?;

    Ok(Json(PermissionResponse::from(permission)))
}

pub async fn delete_permission_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(permission_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .rbac_admin_service
        .delete_permission(&context, parse_uuid(&permission_id, "permission")?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Grants reachable through an employee's roles, optionally narrowed to
/// those covering one resource and action.
pub async fn employee_permissions_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(employee_id): Path<String>,
    Query(query): Query<EffectivePermissionQuery>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let action = query
        .action
        .as_deref()
        .map(PermissionAction::from_transport)
        .transpose()?;
    let resource = query.resource.map(|value| value.trim().to_lowercase());

    let permissions = state
        .rbac_admin_service
        .effective_permissions(&context, &EmployeeId::new(employee_id)?)
        .await?
        .into_iter()
        .filter(|grant| match (resource.as_deref(), action) {
            (Some(resource), Some(action)) => grant.covers(resource, action),
            (Some(resource), None) => {
                grant.resource().is_wildcard() || grant.resource().as_str() == resource
            }
            (None, Some(action)) => grant.action() == action,
            (None, None) => true,
        })
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}
