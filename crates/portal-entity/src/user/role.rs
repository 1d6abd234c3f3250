//! Portal role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the portal.
///
/// Roles are totally ordered by privilege level:
/// Owner > Secretariat > CompanyAdmin > Student.
///
/// This type is the single source of truth for role comparisons. Call
/// sites use [`Role::has_at_least`], [`Role::is_admin`], and
/// [`Role::is_company_admin_or_above`] rather than re-deriving
/// comparisons from role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform owner with full control.
    Owner,
    /// Secretariat staff; globally privileged alongside the owner.
    Secretariat,
    /// Administrator for a member company, scoped by region.
    CompanyAdmin,
    /// Enrolled student; the least-privileged role.
    Student,
}

impl Role {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Owner => 4,
            Self::Secretariat => 3,
            Self::CompanyAdmin => 2,
            Self::Student => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &Role) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is globally privileged (owner or secretariat).
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Owner | Self::Secretariat)
    }

    /// Check if this role is a company admin or higher.
    pub fn is_company_admin_or_above(&self) -> bool {
        self.has_at_least(&Self::CompanyAdmin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Secretariat => "secretariat",
            Self::CompanyAdmin => "company_admin",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = portal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "secretariat" => Ok(Self::Secretariat),
            "company_admin" => Ok(Self::CompanyAdmin),
            "student" => Ok(Self::Student),
            _ => Err(portal_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: owner, secretariat, company_admin, student"
            ))),
        }
    }
}
