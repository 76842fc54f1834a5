//! Role → capability registry.
//!
//! The single source of truth for which role may do what. Changing who can
//! reach the admin area is an edit to [`builtin_capabilities`] or to the
//! deployment's role overrides, never to the gate logic.

use std::collections::{BTreeMap, HashMap, HashSet};

use hireforge_core::{Capability, Role};
use tracing::{debug, warn};

/// Deployment-supplied replacements for individual roles' capability sets.
pub type RoleOverrides = BTreeMap<Role, Vec<Capability>>;

/// The built-in capability set of a role.
///
/// The match is exhaustive: a new `Role` variant does not compile until its
/// set is declared here.
pub fn builtin_capabilities(role: Role) -> Vec<Capability> {
    use Capability as C;
    match role {
        Role::SuperAdmin => vec![
            C::DASHBOARD_VIEW,
            C::JOBS_VIEW,
            C::JOBS_MANAGE,
            C::CANDIDATES_VIEW,
            C::CANDIDATES_MANAGE,
            C::APPLICATIONS_VIEW,
            C::APPLICATIONS_MANAGE,
            C::INTERVIEWS_VIEW,
            C::INTERVIEWS_MANAGE,
            C::EMPLOYEES_VIEW,
            C::EMPLOYEES_MANAGE,
            C::DEPARTMENTS_VIEW,
            C::DEPARTMENTS_MANAGE,
            C::FORMS_MANAGE,
            C::REPORTS_VIEW,
            C::USERS_MANAGE,
            C::SETTINGS_MANAGE,
        ],
        Role::HrManager => vec![
            C::DASHBOARD_VIEW,
            C::JOBS_VIEW,
            C::JOBS_MANAGE,
            C::CANDIDATES_VIEW,
            C::CANDIDATES_MANAGE,
            C::APPLICATIONS_VIEW,
            C::APPLICATIONS_MANAGE,
            C::INTERVIEWS_VIEW,
            C::INTERVIEWS_MANAGE,
            C::EMPLOYEES_VIEW,
            C::EMPLOYEES_MANAGE,
            C::DEPARTMENTS_VIEW,
            C::DEPARTMENTS_MANAGE,
            C::FORMS_MANAGE,
            C::REPORTS_VIEW,
        ],
        Role::HrStaff => vec![
            C::DASHBOARD_VIEW,
            C::JOBS_VIEW,
            C::CANDIDATES_VIEW,
            C::CANDIDATES_MANAGE,
            C::APPLICATIONS_VIEW,
            C::APPLICATIONS_MANAGE,
            C::INTERVIEWS_VIEW,
            C::INTERVIEWS_MANAGE,
            C::EMPLOYEES_VIEW,
            C::DEPARTMENTS_VIEW,
        ],
        Role::Recruiter => vec![
            C::DASHBOARD_VIEW,
            C::JOBS_VIEW,
            C::JOBS_MANAGE,
            C::CANDIDATES_VIEW,
            C::CANDIDATES_MANAGE,
            C::APPLICATIONS_VIEW,
            C::APPLICATIONS_MANAGE,
            C::INTERVIEWS_VIEW,
            C::INTERVIEWS_MANAGE,
        ],
        Role::DepartmentHead => vec![
            C::DASHBOARD_VIEW,
            C::JOBS_VIEW,
            C::CANDIDATES_VIEW,
            C::APPLICATIONS_VIEW,
            C::INTERVIEWS_VIEW,
            C::INTERVIEWS_MANAGE,
            C::EMPLOYEES_VIEW,
            C::DEPARTMENTS_VIEW,
            C::REPORTS_VIEW,
        ],
        Role::Viewer => vec![
            C::DASHBOARD_VIEW,
            C::JOBS_VIEW,
            C::CANDIDATES_VIEW,
            C::APPLICATIONS_VIEW,
            C::REPORTS_VIEW,
        ],
        Role::Finance | Role::Employee | Role::Candidate | Role::Unknown => Vec::new(),
    }
}

/// Immutable role → capability table.
///
/// Built once at startup and shared behind an `Arc`; lookups take `&self`
/// and never lock.
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    table: HashMap<Role, HashSet<Capability>>,
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PermissionRegistry {
    /// The built-in table for every known role.
    pub fn builtin() -> Self {
        let table = Role::ALL
            .iter()
            .map(|&role| (role, builtin_capabilities(role).into_iter().collect()))
            .collect();
        Self { table }
    }

    /// Built-in table with some roles' sets replaced wholesale.
    ///
    /// `Role::Unknown` can never be granted anything; an override for it is
    /// dropped.
    pub fn with_overrides(overrides: &RoleOverrides) -> Self {
        let mut registry = Self::builtin();
        for (role, capabilities) in overrides {
            if !role.is_known() {
                warn!(role = %role, "Ignoring capability override for unknown role");
                continue;
            }
            debug!(role = %role, count = capabilities.len(), "Applying capability override");
            registry
                .table
                .insert(*role, capabilities.iter().cloned().collect());
        }
        registry
    }

    /// Whether `role` holds `capability`. Total: unknown roles and unknown
    /// tokens yield `false`.
    pub fn has_permission(&self, role: Role, capability: &str) -> bool {
        self.table
            .get(&role)
            .map(|caps| caps.contains(capability))
            .unwrap_or(false)
    }

    /// String form for untyped boundaries. An unparsable role holds nothing.
    pub fn has_permission_str(&self, role: &str, capability: &str) -> bool {
        self.has_permission(Role::parse(role), capability)
    }

    /// The role's capabilities, sorted.
    pub fn capabilities(&self, role: Role) -> Vec<Capability> {
        let mut caps: Vec<Capability> = self
            .table
            .get(&role)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        caps.sort();
        caps
    }

    /// Every known role holding `capability`, in declaration order.
    pub fn roles_with(&self, capability: &str) -> Vec<Role> {
        Role::ALL
            .iter()
            .copied()
            .filter(|&role| self.has_permission(role, capability))
            .collect()
    }

    /// Sorted view of the whole table, for display.
    pub fn snapshot(&self) -> BTreeMap<Role, Vec<Capability>> {
        Role::ALL
            .iter()
            .map(|&role| (role, self.capabilities(role)))
            .collect()
    }
}
