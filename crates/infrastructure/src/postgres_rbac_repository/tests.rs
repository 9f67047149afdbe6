use hrdesk_application::{
    AssignmentQuery, AssignmentRepository, CreateAssignmentInput, CreatePermissionInput,
    CreateRoleInput, PermissionRepository, RoleRepository,
};
use hrdesk_core::{AppError, RbacError};
use hrdesk_domain::{EmployeeId, PermissionAction, ResourceName, RoleKey};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresRbacRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres rbac tests: {error}");
    }

    Some(pool)
}

async fn ensure_employee(pool: &PgPool, name: &str) -> EmployeeId {
    let employee_id = format!("E-{}", Uuid::new_v4().simple());
    let insert = sqlx::query(
        r#"
            INSERT INTO employees (id, full_name, email, department, position)
            VALUES ($1, $2, $3, 'Engineering', 'Engineer')
            "#,
    )
    .bind(employee_id.as_str())
    .bind(name)
    .bind(format!("{employee_id}@example.com"))
    .execute(pool)
    .await;
    assert!(insert.is_ok());

    EmployeeId::new(employee_id).unwrap_or_else(|_| unreachable!())
}

async fn ensure_role(repository: &PostgresRbacRepository) -> RoleKey {
    let suffix = Uuid::new_v4().simple().to_string();
    let role_id = RoleKey::new(format!("role_{suffix}")).unwrap_or_else(|_| unreachable!());
    let created = repository
        .create_role(CreateRoleInput {
            role_id: role_id.clone(),
            name: format!("Test Role {suffix}"),
            description: None,
        })
        .await;
    assert!(created.is_ok());

    role_id
}

#[tokio::test]
async fn canonical_roles_are_seeded() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRbacRepository::new(pool);

    let role = repository
        .find_role(&RoleKey::new("role_admin").unwrap_or_else(|_| unreachable!()))
        .await;

    assert!(matches!(role, Ok(Some(ref role)) if role.name() == "Admin"));
}

#[tokio::test]
async fn duplicate_assignment_maps_unique_violation() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRbacRepository::new(pool.clone());
    let employee_id = ensure_employee(&pool, "Ada Lovelace").await;
    let role_id = ensure_role(&repository).await;
    let input = CreateAssignmentInput {
        employee_id: employee_id.clone(),
        role_id: role_id.clone(),
    };

    assert!(repository.create_assignment(input.clone()).await.is_ok());
    let second = repository.create_assignment(input).await;

    assert!(matches!(
        second,
        Err(AppError::Rbac(RbacError::DuplicateAssignment { .. }))
    ));
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM rbac_assignments WHERE employee_id = $1 AND role_id = $2",
    )
    .bind(employee_id.as_str())
    .bind(role_id.as_str())
    .fetch_one(&pool)
    .await;
    assert!(matches!(count, Ok(1)));
}

#[tokio::test]
async fn missing_references_map_foreign_key_violations() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRbacRepository::new(pool.clone());
    let employee_id = ensure_employee(&pool, "Grace Hopper").await;
    let role_id = ensure_role(&repository).await;

    let unknown_employee = repository
        .create_assignment(CreateAssignmentInput {
            employee_id: EmployeeId::new("E-missing").unwrap_or_else(|_| unreachable!()),
            role_id: role_id.clone(),
        })
        .await;
    assert!(matches!(
        unknown_employee,
        Err(AppError::Rbac(RbacError::UnknownEmployee(_)))
    ));

    let ghost = RoleKey::new("role_ghost_missing").unwrap_or_else(|_| unreachable!());
    let unknown_role = repository
        .create_assignment(CreateAssignmentInput {
            employee_id,
            role_id: ghost.clone(),
        })
        .await;
    assert!(matches!(
        unknown_role,
        Err(AppError::Rbac(RbacError::UnknownRole(_)))
    ));

    let permission = repository
        .create_permission(CreatePermissionInput {
            role_id: ghost,
            resource: ResourceName::new("employee").unwrap_or_else(|_| unreachable!()),
            action: PermissionAction::Read,
        })
        .await;
    assert!(matches!(
        permission,
        Err(AppError::Rbac(RbacError::UnknownRole(_)))
    ));
}

#[tokio::test]
async fn assigned_role_cannot_be_deleted() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRbacRepository::new(pool.clone());
    let employee_id = ensure_employee(&pool, "Mary Jackson").await;
    let role_id = ensure_role(&repository).await;
    assert!(
        repository
            .create_assignment(CreateAssignmentInput {
                employee_id,
                role_id: role_id.clone(),
            })
            .await
            .is_ok()
    );

    let result = repository.delete_role(&role_id).await;

    assert!(matches!(
        result,
        Err(AppError::Rbac(RbacError::RoleInUse {
            assignment_count: 1,
            ..
        }))
    ));
    assert!(matches!(repository.find_role(&role_id).await, Ok(Some(_))));
}

#[tokio::test]
async fn role_delete_cascades_permissions() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRbacRepository::new(pool);
    let role_id = ensure_role(&repository).await;
    assert!(
        repository
            .create_permission(CreatePermissionInput {
                role_id: role_id.clone(),
                resource: ResourceName::new("all").unwrap_or_else(|_| unreachable!()),
                action: PermissionAction::ManageRoles,
            })
            .await
            .is_ok()
    );

    assert!(repository.delete_role(&role_id).await.is_ok());

    let remaining = repository
        .list_permissions(Some(&role_id))
        .await
        .unwrap_or_default();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn assignment_search_treats_wildcards_literally() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRbacRepository::new(pool.clone());
    let marker = Uuid::new_v4().simple().to_string();
    let employee_id = ensure_employee(&pool, &format!("Katherine {marker}")).await;
    let role_id = ensure_role(&repository).await;
    assert!(
        repository
            .create_assignment(CreateAssignmentInput {
                employee_id,
                role_id,
            })
            .await
            .is_ok()
    );

    let found = repository
        .list_assignments(AssignmentQuery {
            search: Some(marker.to_uppercase()),
            ..AssignmentQuery::default()
        })
        .await;
    assert!(matches!(found, Ok(ref page) if page.total == 1));

    let wildcard = repository
        .list_assignments(AssignmentQuery {
            search: Some(format!("%{marker}_")),
            ..AssignmentQuery::default()
        })
        .await;
    assert!(matches!(wildcard, Ok(ref page) if page.total == 0));
}
