use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The role a user holds. Carried inside tokens as its textual name
/// (`USER`, `PREMIUM`, `ADMIN`) and stored as text in the users table.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Premium,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Premium => "PREMIUM",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a role name outside the closed set. Unknown names are never
/// silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unrecognized role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "PREMIUM" => Ok(Role::Premium),
            "ADMIN" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// A registered user. The password hash never leaves the auth routes;
/// tokens carry only id, email, and role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// Creates a fresh user with a new id and the default `USER` role.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role: Role::User,
            joined_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_canonical_names() {
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!("PREMIUM".parse::<Role>().unwrap(), Role::Premium);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_rejects_unknown_names() {
        assert!("user".parse::<Role>().is_err());
        assert!("SUPERUSER".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());

        let err = "MODERATOR".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized role: MODERATOR");
    }

    #[test]
    fn test_role_round_trips_through_as_str() {
        for role in [Role::User, Role::Premium, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("a@example.com".into(), "hash".into());
        assert_eq!(user.role, Role::User);
        assert_eq!(user.email, "a@example.com");
    }
}
