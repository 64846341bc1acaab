//! Identity store: user roster and current authenticated identity.
//!
//! Generic over [`KvStore`] and [`CredentialHasher`] to maintain clean
//! architecture (succor-core never depends on succor-infra).

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use succor_types::error::{IdentityError, StorageError};
use succor_types::user::{User, UserRole};

use crate::service::hash::CredentialHasher;
use crate::storage::kv_store::KvStore;

/// Storage key for the user roster.
const ROSTER_KEY: &str = "users";
/// Storage key for the persisted current identity.
const CURRENT_IDENTITY_KEY: &str = "session";

/// Bootstrap admin seeded into an empty roster.
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@succor.local";
pub const DEFAULT_ADMIN_PASSWORD: &str = "changeme";

/// Owns the user roster and the current authenticated identity.
///
/// At most one identity is authenticated at any time. Roster mutation
/// (`add_user`, `delete_user`) is exposed only through the administrative
/// surface; policy enforcement happens at the call site, keeping this a
/// pure data component.
pub struct IdentityStore<K: KvStore, H: CredentialHasher> {
    kv: K,
    hasher: H,
    users: Vec<User>,
    current: Option<User>,
}

impl<K: KvStore, H: CredentialHasher> IdentityStore<K, H> {
    pub fn new(kv: K, hasher: H) -> Self {
        Self {
            kv,
            hasher,
            users: Vec::new(),
            current: None,
        }
    }

    /// Load the roster from durable storage, seeding the built-in admin
    /// when no usable roster exists.
    ///
    /// Idempotent: an existing non-empty roster is never overwritten. A
    /// corrupt roster record is discarded and reseeded.
    pub fn initialize_roster(&mut self) -> Result<(), IdentityError> {
        match self.kv.get::<Vec<User>>(ROSTER_KEY) {
            Ok(Some(users)) if !users.is_empty() => {
                self.users = users;
                Ok(())
            }
            Ok(_) => self.seed_roster(),
            Err(err) if err.is_corrupt() => {
                warn!(%err, "discarding corrupt roster record");
                self.kv.remove(ROSTER_KEY)?;
                self.seed_roster()
            }
            Err(err) => Err(err.into()),
        }
    }

    fn seed_roster(&mut self) -> Result<(), IdentityError> {
        let admin = User {
            id: Uuid::now_v7(),
            name: DEFAULT_ADMIN_NAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password_hash: self.hasher.hash(DEFAULT_ADMIN_PASSWORD)?,
            role: UserRole::Admin,
            created_at: Utc::now(),
        };
        info!(email = DEFAULT_ADMIN_EMAIL, "seeding roster with built-in admin");
        self.users = vec![admin];
        self.persist_roster()?;
        Ok(())
    }

    /// Authenticate against the roster.
    ///
    /// On a match, sets and persists the current identity and returns
    /// true. On no match, leaves prior state untouched and returns false;
    /// the caller learns nothing about which part of the credential was
    /// wrong.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let matched = self
            .users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| self.hasher.verify(password, &u.password_hash))
            .cloned();

        let Some(user) = matched else {
            return false;
        };

        if let Err(err) = self.kv.set(CURRENT_IDENTITY_KEY, &user) {
            warn!(%err, "failed to persist identity; login will not survive restart");
        }
        info!(user_id = %user.id, "login");
        self.current = Some(user);
        true
    }

    /// Clear the current identity and its persisted record.
    ///
    /// Always succeeds, even when nothing was logged in.
    pub fn logout(&mut self) {
        if let Err(err) = self.kv.remove(CURRENT_IDENTITY_KEY) {
            warn!(%err, "failed to remove persisted identity record");
        }
        if self.current.take().is_some() {
            info!("logout");
        }
    }

    /// Restore the persisted identity at process start.
    ///
    /// An unreadable record is deleted and the store proceeds logged out;
    /// restore is fail-safe, never fatal.
    pub fn restore_session(&mut self) {
        match self.kv.get::<User>(CURRENT_IDENTITY_KEY) {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "restored persisted identity");
                self.current = Some(user);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%err, "discarding unreadable identity record");
                if let Err(err) = self.kv.remove(CURRENT_IDENTITY_KEY) {
                    warn!(%err, "failed to remove unreadable identity record");
                }
            }
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(User::is_admin)
    }

    /// The full roster, in insertion order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Add a user to the roster. Identity is unique by email.
    pub fn add_user(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, IdentityError> {
        if self.users.iter().any(|u| u.email == email) {
            return Err(IdentityError::EmailTaken(email.to_string()));
        }

        let user = User {
            id: Uuid::now_v7(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: self.hasher.hash(password)?,
            role,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        self.persist_roster()?;
        info!(user_id = %user.id, "user added to roster");
        Ok(user)
    }

    /// Remove a user from the roster. Unknown ids are a no-op.
    pub fn delete_user(&mut self, id: &Uuid) -> Result<(), IdentityError> {
        let before = self.users.len();
        self.users.retain(|u| u.id != *id);
        if self.users.len() == before {
            return Ok(());
        }
        self.persist_roster()?;
        info!(user_id = %id, "user removed from roster");
        Ok(())
    }

    fn persist_roster(&self) -> Result<(), StorageError> {
        self.kv.set(ROSTER_KEY, &self.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use succor_types::error::HashError;

    use crate::storage::memory::MemoryKvStore;

    /// Transparent hasher so tests can assert on stored values without
    /// pulling in a real KDF.
    struct StubHasher;

    impl CredentialHasher for StubHasher {
        fn hash(&self, password: &str) -> Result<String, HashError> {
            Ok(format!("stub:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> bool {
            hash == format!("stub:{password}")
        }
    }

    fn store() -> IdentityStore<MemoryKvStore, StubHasher> {
        IdentityStore::new(MemoryKvStore::new(), StubHasher)
    }

    #[test]
    fn test_initialize_seeds_admin_when_absent() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        assert_eq!(ids.users().len(), 1);
        let admin = &ids.users()[0];
        assert_eq!(admin.email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(admin.role, UserRole::Admin);
        // Seeded credential is hashed, never stored as plaintext.
        assert_ne!(admin.password_hash, DEFAULT_ADMIN_PASSWORD);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        ids.add_user("Rosa", "rosa@example.com", "pw", UserRole::User)
            .unwrap();
        let seeded_admin_id = ids.users()[0].id;

        ids.initialize_roster().unwrap();
        assert_eq!(ids.users().len(), 2);
        assert_eq!(ids.users()[0].id, seeded_admin_id);
    }

    #[test]
    fn test_initialize_reseeds_empty_roster() {
        let mut ids = store();
        ids.kv.set("users", &Vec::<User>::new()).unwrap();
        ids.initialize_roster().unwrap();
        assert_eq!(ids.users().len(), 1);
    }

    #[test]
    fn test_initialize_discards_corrupt_roster() {
        let mut ids = store();
        ids.kv.insert_raw("users", serde_json::json!("not a roster"));
        ids.initialize_roster().unwrap();
        assert_eq!(ids.users().len(), 1);
        assert_eq!(ids.users()[0].email, DEFAULT_ADMIN_EMAIL);
    }

    #[test]
    fn test_login_success_sets_current_identity() {
        let mut ids = store();
        ids.initialize_roster().unwrap();

        assert!(ids.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD));
        assert!(ids.is_authenticated());
        assert!(ids.is_admin());
        let current = ids.current_user().unwrap();
        assert_eq!(current.email, DEFAULT_ADMIN_EMAIL);
        // Identity record persisted for restore.
        assert!(ids.kv.contains("session"));
    }

    #[test]
    fn test_login_failure_leaves_state_untouched() {
        let mut ids = store();
        ids.initialize_roster().unwrap();

        assert!(!ids.login(DEFAULT_ADMIN_EMAIL, "wrong"));
        assert!(!ids.is_authenticated());
        assert!(!ids.kv.contains("session"));

        assert!(!ids.login("nobody@example.com", DEFAULT_ADMIN_PASSWORD));
        assert!(!ids.is_authenticated());
    }

    #[test]
    fn test_login_failure_does_not_clear_prior_identity() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        assert!(ids.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD));

        assert!(!ids.login(DEFAULT_ADMIN_EMAIL, "wrong"));
        assert!(ids.is_authenticated());
        assert_eq!(ids.current_user().unwrap().email, DEFAULT_ADMIN_EMAIL);
    }

    #[test]
    fn test_logout_clears_identity_and_record() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        assert!(ids.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD));

        ids.logout();
        assert!(!ids.is_authenticated());
        assert!(!ids.kv.contains("session"));

        // Logging out while logged out is fine.
        ids.logout();
        assert!(!ids.is_authenticated());
    }

    #[test]
    fn test_restore_session_roundtrip() {
        let kv = MemoryKvStore::new();
        let mut ids = IdentityStore::new(kv, StubHasher);
        ids.initialize_roster().unwrap();
        assert!(ids.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD));
        let id = ids.current_user().unwrap().id;

        // Simulate a restart: fresh store over the same underlying data.
        let IdentityStore { kv, .. } = ids;
        let mut restored = IdentityStore::new(kv, StubHasher);
        restored.initialize_roster().unwrap();
        restored.restore_session();
        assert!(restored.is_authenticated());
        assert_eq!(restored.current_user().unwrap().id, id);
    }

    #[test]
    fn test_restore_session_discards_corrupt_record() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        ids.kv.insert_raw("session", serde_json::json!(42));

        ids.restore_session();
        assert!(!ids.is_authenticated());
        assert!(!ids.kv.contains("session"));
    }

    #[test]
    fn test_add_user_rejects_duplicate_email() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        ids.add_user("Rosa", "rosa@example.com", "pw", UserRole::User)
            .unwrap();

        let err = ids
            .add_user("Other Rosa", "rosa@example.com", "pw2", UserRole::User)
            .unwrap_err();
        assert!(matches!(err, IdentityError::EmailTaken(_)));
        assert_eq!(ids.users().len(), 2);
    }

    #[test]
    fn test_added_user_can_login() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        ids.add_user("Rosa", "rosa@example.com", "s3cret", UserRole::User)
            .unwrap();

        assert!(ids.login("rosa@example.com", "s3cret"));
        assert!(!ids.is_admin());
    }

    #[test]
    fn test_delete_user_unknown_id_is_noop() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        ids.delete_user(&Uuid::now_v7()).unwrap();
        assert_eq!(ids.users().len(), 1);
    }

    #[test]
    fn test_delete_user_persists() {
        let mut ids = store();
        ids.initialize_roster().unwrap();
        let user = ids
            .add_user("Rosa", "rosa@example.com", "pw", UserRole::User)
            .unwrap();

        ids.delete_user(&user.id).unwrap();
        assert_eq!(ids.users().len(), 1);
        let stored: Vec<User> = ids.kv.get("users").unwrap().unwrap();
        assert_eq!(stored.len(), 1);
    }
}
