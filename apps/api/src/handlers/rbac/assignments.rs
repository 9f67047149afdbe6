use super::*;

use hrdesk_application::CreateAssignmentInput;

pub async fn list_assignments_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Query(query): Query<AssignmentListQuery>,
) -> ApiResult<Json<PageResponse<AssignmentEntryResponse>>> {
    let page = state
        .rbac_admin_service
        .list_assignments(&context, query.into())
        .await?;

    Ok(Json(PageResponse::from(page)))
}

pub async fn get_assignment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(assignment_id): Path<String>,
) -> ApiResult<Json<AssignmentEntryResponse>> {
    let entry = state
        .rbac_admin_service
        .get_assignment(&context, parse_uuid(&assignment_id, "assignment")?)
        .await?;

    Ok(Json(AssignmentEntryResponse::from(entry)))
}

pub async fn create_assignment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    ApiJson(payload): ApiJson<CreateAssignmentRequest>,
) -> ApiResult<(StatusCode, Json<AssignmentResponse>)> {
    let assignment = state
        .rbac_admin_service
        .create_assignment(
            &context,
            CreateAssignmentInput {
                employee_id: EmployeeId::new(payload.employee_id)?,
                role_id: RoleKey::new(payload.role_id)?,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AssignmentResponse::from(assignment))))
}

pub async fn update_assignment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(assignment_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateAssignmentRequest>,
) -> ApiResult<Json<AssignmentResponse>> {
    let assignment = state
        .rbac_admin_service
        .update_assignment(
            &context,
            parse_uuid(&assignment_id, "assignment")?,
            &RoleKey::new(payload.role_id)?,
        )
        .await?;

    Ok(Json(AssignmentResponse::from(assignment)))
}

pub async fn delete_assignment_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AccessContext>,
    Path(assignment_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .rbac_admin_service
        .delete_assignment(&context, parse_uuid(&assignment_id, "assignment")?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
