//! The closed set of user roles.
//!
//! Roles are assigned by the authentication subsystem and are never
//! edited at runtime. Anything the enumeration does not know collapses to
//! [`Role::Unknown`], which holds no capabilities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity category of an authenticated user.
///
/// Wire form is SCREAMING_SNAKE_CASE (`HR_MANAGER`). Deserialization never
/// fails: unrecognised identifiers become `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Role {
    SuperAdmin,
    HrManager,
    HrStaff,
    Recruiter,
    DepartmentHead,
    Viewer,
    Finance,
    Employee,
    Candidate,
    /// Any identifier outside the enumeration.
    Unknown,
}

impl Role {
    /// Every known role, in declaration order. `Unknown` is excluded.
    pub const ALL: [Role; 9] = [
        Role::SuperAdmin,
        Role::HrManager,
        Role::HrStaff,
        Role::Recruiter,
        Role::DepartmentHead,
        Role::Viewer,
        Role::Finance,
        Role::Employee,
        Role::Candidate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::HrManager => "HR_MANAGER",
            Role::HrStaff => "HR_STAFF",
            Role::Recruiter => "RECRUITER",
            Role::DepartmentHead => "DEPARTMENT_HEAD",
            Role::Viewer => "VIEWER",
            Role::Finance => "FINANCE",
            Role::Employee => "EMPLOYEE",
            Role::Candidate => "CANDIDATE",
            Role::Unknown => "UNKNOWN",
        }
    }

    /// Lenient parse: case-insensitive, `-` and spaces read as `_`.
    pub fn parse(raw: &str) -> Role {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == normalized)
            .unwrap_or(Role::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::parse(&value)
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> Self {
        role.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!(Role::parse("SUPER_ADMIN"), Role::SuperAdmin);
        assert_eq!(Role::parse("DEPARTMENT_HEAD"), Role::DepartmentHead);
        assert_eq!(Role::parse("VIEWER"), Role::Viewer);
    }

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!(Role::parse("hr-manager"), Role::HrManager);
        assert_eq!(Role::parse(" hr staff "), Role::HrStaff);
    }

    #[test]
    fn unrecognised_names_become_unknown() {
        assert_eq!(Role::parse("JANITOR"), Role::Unknown);
        assert_eq!(Role::parse(""), Role::Unknown);
        // The catch-all's own wire name is not a way in.
        assert_eq!(Role::parse("UNKNOWN"), Role::Unknown);
        assert!(!Role::Unknown.is_known());
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Role::HrManager).unwrap();
        assert_eq!(json, "\"HR_MANAGER\"");
        let role: Role = serde_json::from_str("\"RECRUITER\"").unwrap();
        assert_eq!(role, Role::Recruiter);
        let role: Role = serde_json::from_str("\"ALIEN\"").unwrap();
        assert_eq!(role, Role::Unknown);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for role in Role::ALL {
            assert_eq!(Role::parse(&role.to_string()), role);
        }
    }
}
