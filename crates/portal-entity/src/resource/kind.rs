//! Resource kind tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of portal content a [`super::Resource`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A class students can enroll in.
    Class,
    /// A committee students can join.
    Committee,
    /// A project students can participate in.
    Project,
    /// An announcement; read-only, never enrollable.
    Announcement,
}

impl ResourceKind {
    /// Whether this kind carries an enrollment roster.
    pub fn supports_enrollment(&self) -> bool {
        !matches!(self, Self::Announcement)
    }

    /// The plural path segment used in API routes.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Class => "classes",
            Self::Committee => "committees",
            Self::Project => "projects",
            Self::Announcement => "announcements",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Committee => write!(f, "committee"),
            Self::Project => write!(f, "project"),
            Self::Announcement => write!(f, "announcement"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = portal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" | "classes" => Ok(Self::Class),
            "committee" | "committees" => Ok(Self::Committee),
            "project" | "projects" => Ok(Self::Project),
            "announcement" | "announcements" => Ok(Self::Announcement),
            _ => Err(portal_core::AppError::validation(format!(
                "Unknown content kind: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_parse_back() {
        for kind in [
            ResourceKind::Class,
            ResourceKind::Committee,
            ResourceKind::Project,
            ResourceKind::Announcement,
        ] {
            assert_eq!(kind.path_segment().parse::<ResourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_announcements_not_enrollable() {
        assert!(ResourceKind::Class.supports_enrollment());
        assert!(!ResourceKind::Announcement.supports_enrollment());
    }
}
