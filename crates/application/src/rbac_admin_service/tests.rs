use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use hrdesk_core::{AccessContext, AccessError, AppError, AppResult, RbacError};
use hrdesk_domain::{
    Assignment, EmployeeId, Page, PageRequest, PermissionAction, PermissionGrant, ResourceName,
    Role, RoleKey,
};

use crate::{
    AssignmentEntry, AssignmentQuery, AssignmentRepository, CreateAssignmentInput,
    CreatePermissionInput, CreateRoleInput, PermissionRepository, RoleRepository,
    UpdatePermissionInput, UpdateRoleInput,
};

use super::RbacAdminService;

#[derive(Default)]
struct FakeRbacRepository {
    roles: Mutex<Vec<Role>>,
    assignments: Mutex<Vec<Assignment>>,
    last_query: Mutex<Option<AssignmentQuery>>,
}

#[async_trait]
impl RoleRepository for FakeRbacRepository {
    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.lock().await.clone())
    }

    async fn find_role(&self, role_id: &RoleKey) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.role_id() == role_id)
            .cloned())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let now = Utc::now();
        let role = Role::new(input.role_id, input.name, input.description, now, now)?;
        self.roles.lock().await.push(role.clone());
        Ok(role)
    }

    async fn update_role(&self, role_id: &RoleKey, _input: UpdateRoleInput) -> AppResult<Role> {
        Err(AppError::NotFound(format!("role '{role_id}' was not found")))
    }

    async fn delete_role(&self, role_id: &RoleKey) -> AppResult<()> {
        let assignment_count = self
            .assignments
            .lock()
            .await
            .iter()
            .filter(|assignment| assignment.role_id() == role_id)
            .count();
        if assignment_count > 0 {
            return Err(RbacError::RoleInUse {
                role_id: role_id.to_string(),
                assignment_count: assignment_count as u64,
            }
            .into());
        }

        self.roles
            .lock()
            .await
            .retain(|role| role.role_id() != role_id);
        Ok(())
    }
}

#[async_trait]
impl PermissionRepository for FakeRbacRepository {
    async fn list_permissions(
        &self,
        _role_id: Option<&RoleKey>,
    ) -> AppResult<Vec<PermissionGrant>> {
        Ok(Vec::new())
    }

    async fn find_permission(&self, _permission_id: Uuid) -> AppResult<Option<PermissionGrant>> {
        Ok(None)
    }

    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<PermissionGrant> {
        Err(RbacError::UnknownRole(input.role_id.to_string()).into())
    }

    async fn update_permission(
        &self,
        permission_id: Uuid,
        _input: UpdatePermissionInput,
    ) -> AppResult<PermissionGrant> {
        Err(AppError::NotFound(format!(
            "permission '{permission_id}' was not found"
        )))
    }

    async fn delete_permission(&self, _permission_id: Uuid) -> AppResult<()> {
        Ok(())
    }

    async fn list_permissions_for_employee(
        &self,
        _employee_id: &EmployeeId,
    ) -> AppResult<Vec<PermissionGrant>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl AssignmentRepository for FakeRbacRepository {
    async fn list_assignments(&self, query: AssignmentQuery) -> AppResult<Page<AssignmentEntry>> {
        let request = query.page;
        *self.last_query.lock().await = Some(query);
        Ok(Page {
            items: Vec::new(),
            total: 0,
            request,
        })
    }

    async fn find_assignment(&self, _assignment_id: Uuid) -> AppResult<Option<AssignmentEntry>> {
        Ok(None)
    }

    async fn create_assignment(&self, input: CreateAssignmentInput) -> AppResult<Assignment> {
        let mut assignments = self.assignments.lock().await;
        if assignments
            .iter()
            .any(|assignment| assignment.binds(&input.employee_id, &input.role_id))
        {
            return Err(RbacError::DuplicateAssignment {
                employee_id: input.employee_id.to_string(),
                role_id: input.role_id.to_string(),
            }
            .into());
        }

        let assignment =
            Assignment::new(Uuid::new_v4(), input.employee_id, input.role_id, Utc::now());
        assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn update_assignment(
        &self,
        assignment_id: Uuid,
        _role_id: &RoleKey,
    ) -> AppResult<Assignment> {
        Err(AppError::NotFound(format!(
            "assignment '{assignment_id}' was not found"
        )))
    }

    async fn delete_assignment(&self, _assignment_id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

fn service() -> (RbacAdminService, Arc<FakeRbacRepository>) {
    let repository = Arc::new(FakeRbacRepository::default());
    (
        RbacAdminService::new(repository.clone(), repository.clone(), repository.clone()),
        repository,
    )
}

fn actor(subject: &str, role: &str) -> AccessContext {
    AccessContext::new(subject, None, vec![role.to_owned()])
}

fn role_key(value: &str) -> RoleKey {
    let Ok(key) = RoleKey::new(value) else {
        panic!("role key '{value}' should be valid");
    };
    key
}

fn employee_id(value: &str) -> EmployeeId {
    let Ok(employee_id) = EmployeeId::new(value) else {
        panic!("employee id '{value}' should be valid");
    };
    employee_id
}

#[tokio::test]
async fn admin_creates_and_reads_role() {
    let (service, _) = service();
    let admin = actor("alice", "role_admin");

    let created = service
        .create_role(
            &admin,
            CreateRoleInput {
                role_id: role_key("role_auditor"),
                name: "Auditor".to_owned(),
                description: Some("Read-only review".to_owned()),
            },
        )
        .await;
    assert!(created.is_ok());

    let fetched = service.get_role(&admin, &role_key("role_auditor")).await;
    assert!(matches!(fetched, Ok(ref role) if role.name() == "Auditor"));
}

#[tokio::test]
async fn hr_cannot_create_roles_and_repository_is_untouched() {
    let (service, repository) = service();
    let hr = actor("dana", "role_hr");

    let result = service
        .create_role(
            &hr,
            CreateRoleInput {
                role_id: role_key("role_auditor"),
                name: "Auditor".to_owned(),
                description: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::Forbidden { ref allowed, .. }))
            if allowed == &vec!["role_admin".to_owned()]
    ));
    assert!(repository.roles.lock().await.is_empty());
}

#[tokio::test]
async fn employee_cannot_read_roles() {
    let (service, _) = service();

    let result = service.list_roles(&actor("bob", "role_employee")).await;

    assert!(matches!(
        result,
        Err(AppError::Access(AccessError::Forbidden { .. }))
    ));
}

#[tokio::test]
async fn missing_role_is_not_found() {
    let (service, _) = service();

    let result = service
        .get_role(&actor("alice", "role_admin"), &role_key("role_ghost"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn hr_assigns_roles_and_duplicates_are_rejected() {
    let (service, _) = service();
    let hr = actor("dana", "role_hr");
    let input = CreateAssignmentInput {
        employee_id: employee_id("E1"),
        role_id: role_key("role_manager"),
    };

    let first = service.create_assignment(&hr, input.clone()).await;
    assert!(first.is_ok());

    let second = service.create_assignment(&hr, input).await;
    assert!(matches!(
        second,
        Err(AppError::Rbac(RbacError::DuplicateAssignment { ref employee_id, ref role_id }))
            if employee_id == "E1" && role_id == "role_manager"
    ));
}

#[tokio::test]
async fn manager_cannot_assign_roles() {
    let (service, repository) = service();

    let result = service
        .create_assignment(
            &actor("frank", "role_manager"),
            CreateAssignmentInput {
                employee_id: employee_id("E1"),
                role_id: role_key("role_admin"),
            },
        )
        .await;

    assert!(result.is_err());
    assert!(repository.assignments.lock().await.is_empty());
}

#[tokio::test]
async fn deleting_assigned_role_reports_usage() {
    let (service, _) = service();
    let admin = actor("alice", "role_admin");

    let assigned = service
        .create_assignment(
            &admin,
            CreateAssignmentInput {
                employee_id: employee_id("E1"),
                role_id: role_key("role_manager"),
            },
        )
        .await;
    assert!(assigned.is_ok());

    let result = service.delete_role(&admin, &role_key("role_manager")).await;

    assert!(matches!(
        result,
        Err(AppError::Rbac(RbacError::RoleInUse {
            assignment_count: 1,
            ..
        }))
    ));
}

#[tokio::test]
async fn list_assignments_drops_blank_filters() {
    let (service, repository) = service();

    let result = service
        .list_assignments(
            &actor("dana", "role_hr"),
            AssignmentQuery {
                search: Some("  ".to_owned()),
                department: Some(" Engineering ".to_owned()),
                position: None,
                role_name: Some(String::new()),
                page: PageRequest::new(Some(2), Some(5)),
            },
        )
        .await;
    assert!(result.is_ok());

    let recorded = repository.last_query.lock().await.clone();
    let Some(recorded) = recorded else {
        panic!("repository should receive the query");
    };
    assert_eq!(recorded.search, None);
    assert_eq!(recorded.department.as_deref(), Some("Engineering"));
    assert_eq!(recorded.role_name, None);
    assert_eq!(recorded.page.offset(), 5);
}

#[tokio::test]
async fn permission_for_unknown_role_is_rejected() {
    let (service, _) = service();

    let Ok(resource) = ResourceName::new("payroll") else {
        panic!("resource should be valid");
    };
    let result = service
        .create_permission(
            &actor("alice", "role_admin"),
            CreatePermissionInput {
                role_id: role_key("role_ghost"),
                resource,
                action: PermissionAction::Read,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::Rbac(RbacError::UnknownRole(ref role_id))) if role_id == "role_ghost"
    ));
}
