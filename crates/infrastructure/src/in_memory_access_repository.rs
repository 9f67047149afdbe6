use std::collections::HashMap;

use chrono::Utc;
use hrdesk_core::AppResult;
use hrdesk_domain::{
    Assignment, CanonicalRole, EmployeeId, EmployeeSummary, PermissionGrant, Role, RoleKey,
};
use tokio::sync::RwLock;

mod assignments;
mod permissions;
mod roles;

/// In-memory implementation of the role, permission and assignment ports.
///
/// All three stores share one lock so multi-entity invariants (role in use,
/// unique assignment pair, cascading permission delete) hold atomically.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    state: RwLock<AccessState>,
}

#[derive(Debug, Default)]
struct AccessState {
    employees: HashMap<EmployeeId, EmployeeSummary>,
    roles: HashMap<RoleKey, Role>,
    permissions: Vec<PermissionGrant>,
    assignments: Vec<Assignment>,
}

impl AccessState {
    fn assignment_count(&self, role_id: &RoleKey) -> u64 {
        self.assignments
            .iter()
            .filter(|assignment| assignment.role_id() == role_id)
            .count() as u64
    }

    fn role_name_taken(&self, name: &str, except: Option<&RoleKey>) -> bool {
        self.roles
            .values()
            .any(|role| role.name() == name.trim() && Some(role.role_id()) != except)
    }
}

impl InMemoryAccessRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the canonical roles.
    pub fn with_canonical_roles() -> AppResult<Self> {
        let now = Utc::now();
        let mut roles = HashMap::new();
        for canonical in CanonicalRole::all() {
            let role = Role::new(
                RoleKey::from(*canonical),
                canonical.display_name(),
                None,
                now,
                now,
            )?;
            roles.insert(role.role_id().clone(), role);
        }

        Ok(Self {
            state: RwLock::new(AccessState {
                roles,
                ..AccessState::default()
            }),
        })
    }

    /// Registers or replaces an employee directory record.
    pub async fn insert_employee(&self, employee: EmployeeSummary) {
        self.state
            .write()
            .await
            .employees
            .insert(employee.employee_id.clone(), employee);
    }

    /// Removes an employee and every assignment that references them.
    pub async fn remove_employee(&self, employee_id: &EmployeeId) -> bool {
        let mut state = self.state.write().await;
        state
            .assignments
            .retain(|assignment| assignment.employee_id() != employee_id);
        state.employees.remove(employee_id).is_some()
    }
}
