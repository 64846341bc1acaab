//! Access guard: gates route and feature visibility by role.
//!
//! Stateless, pure function of the current identity and the requested
//! resource. Must be consulted before rendering or executing any
//! admin-only operation.

use succor_types::user::User;

/// A protected surface of the application.
///
/// The login screen is not a resource; everything listed here requires
/// an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Chat,
    Profile,
    Policies,
    ReferenceDocs,
    AdminPanel,
    UserManagement,
    DocumentUpload,
}

impl Resource {
    /// Whether this resource is restricted to admins.
    pub fn admin_only(self) -> bool {
        matches!(
            self,
            Resource::AdminPanel | Resource::UserManagement | Resource::DocumentUpload
        )
    }
}

/// Whether `identity` may access `resource`.
///
/// Unauthenticated: false for every protected resource. Authenticated
/// non-admin: false for admin-only resources, true otherwise. Admin:
/// true for all.
pub fn can_access(identity: Option<&User>, resource: Resource) -> bool {
    match identity {
        None => false,
        Some(user) => user.is_admin() || !resource.admin_only(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use succor_types::user::UserRole;
    use uuid::Uuid;

    const ALL: [Resource; 7] = [
        Resource::Chat,
        Resource::Profile,
        Resource::Policies,
        Resource::ReferenceDocs,
        Resource::AdminPanel,
        Resource::UserManagement,
        Resource::DocumentUpload,
    ];

    fn user_with_role(role: UserRole) -> User {
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
    fn test_unauthenticated_denied_everywhere() {
        for resource in ALL {
            assert!(!can_access(None, resource));
        }
    }

    #[test]
    fn test_regular_user_denied_admin_resources() {
        let user = user_with_role(UserRole::User);
        assert!(can_access(Some(&user), Resource::Chat));
        assert!(can_access(Some(&user), Resource::Policies));
        assert!(can_access(Some(&user), Resource::ReferenceDocs));
        assert!(!can_access(Some(&user), Resource::AdminPanel));
        assert!(!can_access(Some(&user), Resource::UserManagement));
        assert!(!can_access(Some(&user), Resource::DocumentUpload));
    }

    #[test]
    fn test_admin_allowed_everywhere() {
        let admin = user_with_role(UserRole::Admin);
        for resource in ALL {
            assert!(can_access(Some(&admin), resource));
        }
    }
}
