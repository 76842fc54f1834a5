pub mod rbac;

pub use rbac::{builtin_capabilities, PermissionRegistry, RoleOverrides};
