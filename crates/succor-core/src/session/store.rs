//! Session store: the set of chat sessions owned by the current identity.
//!
//! Persistence is scoped per-user (`chat_sessions_<user_id>`) so storage
//! for different identities never collides; that key scheme is what keeps
//! ownership isolation intact even though the underlying store has no
//! access control of its own.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use succor_types::chat::{ChatSession, Message, MessageRole};
use succor_types::error::{SessionError, StorageError};

use crate::storage::kv_store::KvStore;

/// Prefix of the per-user session list key.
const SESSION_KEY_PREFIX: &str = "chat_sessions";

fn storage_key(user_id: &Uuid) -> String {
    format!("{SESSION_KEY_PREFIX}_{user_id}")
}

/// Owns the ordered session list of the authenticated identity.
///
/// Sessions are ordered newest-first; a newly created session is
/// prepended and becomes active. Contents are reloaded exactly on
/// identity-change events, never on ad hoc reads, so stale or cross-user
/// data is never observed.
pub struct SessionStore<K: KvStore> {
    kv: K,
    user_id: Option<Uuid>,
    sessions: Vec<ChatSession>,
    active: Option<Uuid>,
}

impl<K: KvStore> SessionStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            user_id: None,
            sessions: Vec::new(),
            active: None,
        }
    }

    /// Replace the loaded sessions with those owned by `user_id`.
    ///
    /// Must run whenever the authenticated identity changes (login,
    /// logout, restore). `None` clears the store. The first session of a
    /// non-empty sequence becomes active. A corrupt session record is
    /// discarded and the user starts from an empty list.
    pub fn load_for_user(&mut self, user_id: Option<Uuid>) {
        self.sessions.clear();
        self.active = None;
        self.user_id = user_id;

        let Some(uid) = user_id else { return };
        match self.kv.get::<Vec<ChatSession>>(&storage_key(&uid)) {
            Ok(Some(sessions)) => {
                self.active = sessions.first().map(|s| s.id);
                self.sessions = sessions;
            }
            Ok(None) => {}
            Err(err) => {
                warn!(user_id = %uid, %err, "discarding unreadable session list");
                if let Err(err) = self.kv.remove(&storage_key(&uid)) {
                    warn!(%err, "failed to remove unreadable session list");
                }
            }
        }
    }

    /// Sessions owned by the current identity, newest first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// The currently selected session, if any.
    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active?;
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Create an empty session titled `"Chat N"`, prepend it, persist,
    /// and make it active. Requires an authenticated identity.
    pub fn create_session(&mut self) -> Result<Uuid, SessionError> {
        let uid = self.user_id.ok_or(SessionError::Unauthenticated)?;
        let title = format!("Chat {}", self.sessions.len() + 1);
        let session = ChatSession::new(uid, title);
        let id = session.id;

        self.sessions.insert(0, session);
        self.persist()?;
        self.active = Some(id);
        info!(session_id = %id, "session created");
        Ok(id)
    }

    /// Select the session with `id`. Silent no-op when `id` is not in
    /// the owned sequence; callers treat "no change" as the failure
    /// signal.
    pub fn select_session(&mut self, id: &Uuid) {
        if self.sessions.iter().any(|s| s.id == *id) {
            self.active = Some(*id);
        }
    }

    /// Append a message with a fresh timestamp to the identified session,
    /// bump its `updated_at`, and persist the full sequence. Unknown ids
    /// are a no-op.
    pub fn append_message(
        &mut self,
        session_id: &Uuid,
        role: MessageRole,
        content: &str,
    ) -> Result<(), SessionError> {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == *session_id) else {
            return Ok(());
        };

        let message = Message {
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        };
        session.messages.push(message);
        session.updated_at = Utc::now();
        self.persist()?;
        Ok(())
    }

    /// Retitle the identified session and persist. Unknown ids are a
    /// no-op. The title is the only in-place edit a session admits.
    pub fn rename_session(&mut self, id: &Uuid, title: &str) -> Result<(), SessionError> {
        let Some(session) = self.sessions.iter_mut().find(|s| s.id == *id) else {
            return Ok(());
        };
        session.title = title.to_string();
        self.persist()?;
        Ok(())
    }

    /// Remove the identified session and persist. Deleting the active
    /// session selects the new first session of the remainder, or leaves
    /// no active session when none remain. Unknown ids are a no-op.
    pub fn delete_session(&mut self, id: &Uuid) -> Result<(), SessionError> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != *id);
        if self.sessions.len() == before {
            return Ok(());
        }

        self.persist()?;
        if self.active == Some(*id) {
            self.active = self.sessions.first().map(|s| s.id);
        }
        info!(session_id = %id, "session deleted");
        Ok(())
    }

    fn persist(&self) -> Result<(), StorageError> {
        let Some(uid) = self.user_id else {
            return Ok(());
        };
        self.kv.set(&storage_key(&uid), &self.sessions)
    }
}
