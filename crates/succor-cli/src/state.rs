//! Application state wiring all stores together.
//!
//! AppState holds the concrete store instances used by the CLI. Stores
//! are generic over storage/hasher traits, but AppState pins them to the
//! file-backed and Argon2 infra implementations. This is the one
//! explicit context object the application owns; there are no ambient
//! globals.

use succor_core::document::DocumentStore;
use succor_core::identity::IdentityStore;
use succor_core::session::SessionStore;
use succor_infra::config::{AppConfig, load_config, resolve_data_dir};
use succor_infra::crypto::Argon2CredentialHasher;
use succor_infra::storage::FileKvStore;

/// Concrete type aliases for the store generics pinned to infra
/// implementations.
pub type ConcreteIdentityStore = IdentityStore<FileKvStore, Argon2CredentialHasher>;
pub type ConcreteSessionStore = SessionStore<FileKvStore>;
pub type ConcreteDocumentStore = DocumentStore<FileKvStore>;

/// Application state holding all stores.
pub struct AppState {
    pub identity: ConcreteIdentityStore,
    pub sessions: ConcreteSessionStore,
    pub docs: ConcreteDocumentStore,
    pub config: AppConfig,
}

impl AppState {
    /// Initialize the application state: resolve the data directory,
    /// load config, initialize the roster, restore the persisted
    /// identity, and load that identity's sessions.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let kv = FileKvStore::new(&data_dir)?;

        let mut identity = IdentityStore::new(kv.clone(), Argon2CredentialHasher::new());
        identity.initialize_roster()?;
        identity.restore_session();

        // Session contents load exactly on identity transitions; this is
        // the process-start transition.
        let mut sessions = SessionStore::new(kv.clone());
        sessions.load_for_user(identity.current_user().map(|u| u.id));

        let mut docs = DocumentStore::new(kv);
        docs.load();

        tracing::debug!(data_dir = %data_dir.display(), "application state initialized");

        Ok(Self {
            identity,
            sessions,
            docs,
            config,
        })
    }
}
