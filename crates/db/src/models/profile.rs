//! Profile entity model and the role/theme enums stored on it.

use promptrepo_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Access level stored on a profile. Variants are ordered by privilege so
/// sufficiency checks reduce to a comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    User,
    Pro,
    Admin,
}

impl Role {
    /// Whether this role satisfies `required`: `admin` only by `admin`,
    /// `pro` by `pro` or `admin`, `user` by any authenticated role.
    pub fn meets(self, required: Role) -> bool {
        self >= required
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Pro => "pro",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI theme preference stored on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "theme_pref", rename_all = "lowercase")]
pub enum ThemePref {
    Light,
    Dark,
}

/// A profile row from the `profiles` table.
///
/// Rows are created by the identity provider's signup flow; this API reads
/// them for role resolution and the admin user listing, never writes them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: EntityId,
    pub handle: String,
    pub name: Option<String>,
    pub role: Role,
    pub stripe_customer_id: Option<String>,
    pub theme_pref: ThemePref,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
