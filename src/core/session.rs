use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{SEED_SESSION_TITLE, TITLE_CLIP_GRAPHEMES};
use crate::core::message::{Message, MessageStatus};
use crate::utils::text::clip_with_ellipsis;

pub type SessionId = u64;

/// A named, ordered conversation thread with its own message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            title: Self::default_title(id),
            messages: Vec::new(),
        }
    }

    /// The placeholder session seeded into an empty store. It is never
    /// written into directly; the first send promotes it to a real session.
    pub fn seed() -> Self {
        Self {
            id: 1,
            title: SEED_SESSION_TITLE.to_string(),
            messages: Vec::new(),
        }
    }

    pub fn default_title(id: SessionId) -> String {
        format!("Session {id}")
    }

    /// True while the title still equals its generated default, i.e. no user
    /// rename and no auto-derivation has happened yet.
    pub fn has_default_title(&self) -> bool {
        self.title == Self::default_title(self.id)
    }

    /// Index of the in-flight placeholder, if one exists.
    pub fn pending_reply(&self) -> Option<usize> {
        self.messages.iter().position(Message::is_pending)
    }
}

/// Opaque handle to the placeholder inserted by
/// [`SessionStore::append_placeholder`].
///
/// Resolution goes through this handle rather than a text search: several
/// messages may share the same text, but the handle pins the exact entry
/// created for this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderHandle {
    session: SessionId,
    index: usize,
}

impl PlaceholderHandle {
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// In-memory collection of sessions plus the active-session pointer.
///
/// Sessions are ordered most-recent-first; new sessions are inserted at the
/// front. The store never goes empty: deleting the last session re-seeds it
/// with a fresh placeholder session.
pub struct SessionStore {
    sessions: Vec<Session>,
    active: Option<SessionId>,
    pending_first_interaction: bool,
}

impl SessionStore {
    /// Build the store from whatever the archive produced. An absent or empty
    /// archive yields the seed session and arms the first-interaction flag.
    pub fn from_archive(loaded: Option<Vec<Session>>) -> Self {
        match loaded {
            Some(mut sessions) if !sessions.is_empty() => {
                normalize_interrupted_replies(&mut sessions);
                Self {
                    sessions,
                    active: None,
                    pending_first_interaction: false,
                }
            }
            _ => Self {
                sessions: vec![Session::seed()],
                active: None,
                pending_first_interaction: true,
            },
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.active
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active.and_then(|id| self.session(id))
    }

    /// Point the store at the first session if nothing is active yet. Called
    /// once when the chat view is engaged.
    pub fn activate(&mut self) {
        if self.active.is_none() {
            self.active = self.sessions.first().map(|s| s.id);
        }
    }

    /// True until the first send or explicit session creation; while set, the
    /// next send must create a real session instead of writing into the seed.
    pub fn pending_first_interaction(&self) -> bool {
        self.pending_first_interaction
    }

    /// Allocate an id strictly greater than any existing one, insert a fresh
    /// session at the front, and make it active.
    pub fn create_session(&mut self) -> SessionId {
        let id = self
            .sessions
            .iter()
            .map(|s| s.id)
            .max()
            .map_or(1, |max| max + 1);
        self.sessions.insert(0, Session::new(id));
        self.active = Some(id);
        self.pending_first_interaction = false;
        id
    }

    /// Make `id` active. Unknown ids are ignored.
    pub fn select_session(&mut self, id: SessionId) -> bool {
        if self.session(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Retitle a session. Empty and unchanged titles are ignored.
    pub fn rename_session(&mut self, id: SessionId, new_title: &str) -> bool {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return false;
        }
        match self.session_mut(id) {
            Some(session) if session.title != new_title => {
                session.title = new_title.to_string();
                true
            }
            _ => false,
        }
    }

    /// Remove a session. When the active session is deleted the first
    /// remaining one takes over; deleting the last session re-seeds the store
    /// and re-arms the first-interaction flag.
    pub fn delete_session(&mut self, id: SessionId) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return false;
        }

        if self.sessions.is_empty() {
            self.sessions.push(Session::seed());
            self.active = Some(1);
            self.pending_first_interaction = true;
        } else if self.active == Some(id) {
            self.active = self.sessions.first().map(|s| s.id);
        }
        true
    }

    /// Append the user's turn. The first user message into a session that
    /// still carries its default title also derives the title from the text,
    /// clipped to a fixed width.
    pub fn append_user_message(&mut self, id: SessionId, text: &str) -> bool {
        let Some(session) = self.session_mut(id) else {
            return false;
        };
        if session.has_default_title() {
            session.title = clip_with_ellipsis(text, TITLE_CLIP_GRAPHEMES);
        }
        session.messages.push(Message::user(text));
        true
    }

    /// Append the pending placeholder for an outbound request and hand back
    /// the handle used to resolve it. Refused while the session already holds
    /// a pending reply: at most one request may be in flight per session.
    pub fn append_placeholder(
        &mut self,
        id: SessionId,
        text: impl Into<String>,
    ) -> Option<PlaceholderHandle> {
        let session = self.session_mut(id)?;
        if session.pending_reply().is_some() {
            return None;
        }
        session.messages.push(Message::pending(text));
        Some(PlaceholderHandle {
            session: id,
            index: session.messages.len() - 1,
        })
    }

    pub fn has_pending_reply(&self, id: SessionId) -> bool {
        self.session(id)
            .is_some_and(|s| s.pending_reply().is_some())
    }

    /// Mutate the placeholder behind `handle` into its terminal state. Fails
    /// (returning false) when the session was deleted in the meantime or the
    /// entry is no longer pending.
    pub fn resolve_placeholder(
        &mut self,
        handle: PlaceholderHandle,
        text: &str,
        is_error: bool,
    ) -> bool {
        let Some(session) = self.session_mut(handle.session) else {
            debug!(session = handle.session, "placeholder session disappeared");
            return false;
        };
        let Some(message) = session.messages.get_mut(handle.index) else {
            return false;
        };
        if !message.is_pending() {
            return false;
        }
        message.text = text.to_string();
        message.status = if is_error {
            MessageStatus::Error
        } else {
            MessageStatus::Final
        };
        true
    }
}

/// A pending entry found at load time belongs to a send that was interrupted
/// by process exit. Settle it so the busy guard cannot wedge the session.
fn normalize_interrupted_replies(sessions: &mut [Session]) {
    for session in sessions {
        for message in &mut session.messages {
            if message.is_pending() {
                message.text = "[ERROR] Interrupted before a reply arrived.".to_string();
                message.status = MessageStatus::Error;
            }
        }
    }
}
