//! Roles of users acting on routine maintenance.

use super::ParseActorRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the user invoking a maintenance operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Regular requestor.
    User,
    /// Maintenance staff member.
    Maintenance,
    /// Organization administrator.
    Admin,
    /// Platform operator spanning all organizations.
    SuperAdmin,
}

impl ActorRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Maintenance => "maintenance",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether the role may register and edit routine maintenance tasks.
    #[must_use]
    pub const fn can_manage_routine_tasks(self) -> bool {
        matches!(self, Self::Maintenance | Self::Admin | Self::SuperAdmin)
    }

    /// Whether the role may trigger a sweep by hand.
    #[must_use]
    pub const fn can_trigger_sweep(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = ParseActorRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "maintenance" => Ok(Self::Maintenance),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(ParseActorRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
