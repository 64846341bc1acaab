//! User roster types for Succor.
//!
//! A `User` is a roster record: display name, unique email, a salted
//! one-way credential hash, and a role that gates the admin surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a roster user.
///
/// Admins may mutate the roster and upload reference documents;
/// regular users may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(format!("invalid user role: '{other}'")),
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

/// A roster user.
///
/// Identity is unique by `email`. The credential is stored as a salted
/// one-way hash (PHC string), never as plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// PHC-format hash of the user's password.
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: UserRole) -> User {
        User {
            id: Uuid::now_v7(),
            name: "Rosa".to_string(),
            email: "rosa@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_role_roundtrip() {
        for role in [UserRole::Admin, UserRole::User] {
            let s = role.to_string();
            let parsed: UserRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_user_role_serde() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let parsed: UserRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, UserRole::Admin);
    }

    #[test]
    fn test_user_role_rejects_unknown() {
        assert!("superuser".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_is_admin() {
        assert!(test_user(UserRole::Admin).is_admin());
        assert!(!test_user(UserRole::User).is_admin());
    }

    #[test]
    fn test_user_json_roundtrip() {
        let user = test_user(UserRole::User);
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, user.id);
        assert_eq!(parsed.email, user.email);
    }
}
