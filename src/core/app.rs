use tracing::{debug, warn};

use crate::core::archive::SessionArchive;
use crate::core::dispatch::Reply;
use crate::core::session::{PlaceholderHandle, SessionId, SessionStore};
use crate::core::tools::ToolSelection;
use crate::utils::logging::LoggingState;

/// What the view needs to know after each operation: whether to redraw, and
/// any one-shot status notice to show.
#[derive(Debug, Default)]
pub struct UiState {
    needs_redraw: bool,
    status: Option<String>,
}

impl UiState {
    pub fn mark_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Consume the redraw signal.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Consume the pending status notice.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }
}

/// Runtime state for one chat run: the session store, the tool-mode cell,
/// transcript logging, and the archive every committing mutation flushes to.
///
/// All session mutations go through these methods so that persistence and
/// the re-render signal stay in lockstep with the store.
pub struct App {
    pub store: SessionStore,
    pub tools: ToolSelection,
    pub logging: LoggingState,
    pub ui: UiState,
    archive: Box<dyn SessionArchive>,
}

impl App {
    pub fn new(
        archive: Box<dyn SessionArchive>,
        tools: ToolSelection,
        logging: LoggingState,
    ) -> Self {
        let store = match archive.load() {
            Ok(loaded) => SessionStore::from_archive(loaded),
            Err(err) => {
                warn!("session archive unreadable, starting fresh: {err}");
                SessionStore::from_archive(None)
            }
        };
        let mut ui = UiState::default();
        ui.mark_redraw();
        Self {
            store,
            tools,
            logging,
            ui,
            archive,
        }
    }

    /// Flush the store to the archive. A failed save is surfaced as a status
    /// notice; the in-memory state stays authoritative for this run.
    fn persist(&mut self) {
        if let Err(err) = self.archive.save(self.store.sessions()) {
            warn!("failed to persist sessions: {err}");
            self.ui
                .set_status(format!("Warning: could not save sessions: {err}"));
        }
    }

    pub fn create_session(&mut self) -> SessionId {
        let id = self.store.create_session();
        self.persist();
        self.ui.mark_redraw();
        id
    }

    /// Selection is a view concern only; nothing is persisted.
    pub fn select_session(&mut self, id: SessionId) -> bool {
        if self.store.select_session(id) {
            self.ui.mark_redraw();
            true
        } else {
            false
        }
    }

    pub fn rename_session(&mut self, id: SessionId, new_title: &str) -> bool {
        if self.store.rename_session(id, new_title) {
            self.persist();
            self.ui.mark_redraw();
            true
        } else {
            false
        }
    }

    pub fn delete_session(&mut self, id: SessionId) -> bool {
        if self.store.delete_session(id) {
            self.persist();
            self.ui.mark_redraw();
            true
        } else {
            false
        }
    }

    /// Commit one user turn: the user's message plus the pending placeholder,
    /// persisted together so the in-flight state survives a reload.
    pub fn commit_user_turn(
        &mut self,
        id: SessionId,
        text: &str,
        indicator: String,
    ) -> Option<PlaceholderHandle> {
        if !self.store.append_user_message(id, text) {
            return None;
        }
        let handle = self.store.append_placeholder(id, indicator)?;
        if let Err(err) = self.logging.log_turn("You", text) {
            warn!("failed to log message: {err}");
        }
        self.persist();
        self.ui.mark_redraw();
        Some(handle)
    }

    /// Settle the placeholder for a completed dispatch. Dropped silently when
    /// the session was deleted while the request was in flight.
    pub fn resolve_reply(&mut self, handle: PlaceholderHandle, reply: &Reply) -> bool {
        if !self
            .store
            .resolve_placeholder(handle, &reply.text, reply.is_error)
        {
            debug!(session = handle.session(), "dropping stale reply");
            return false;
        }
        if let Err(err) = self.logging.log_turn("Assistant", &reply.text) {
            warn!("failed to log message: {err}");
        }
        self.persist();
        self.ui.mark_redraw();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::core::dispatch::Reply;
    use crate::utils::test_utils::{create_test_app, MemoryArchive};

    #[test]
    fn fresh_app_starts_with_the_seed_session() {
        let (app, _archive) = create_test_app();
        assert_eq!(app.store.sessions().len(), 1);
        assert_eq!(app.store.sessions()[0].title, "Initial Session");
        assert!(app.store.sessions()[0].messages.is_empty());
    }

    #[test]
    fn mutations_flush_to_the_archive() {
        let (mut app, archive) = create_test_app();
        let id = app.create_session();
        assert_eq!(archive.stored().unwrap().len(), 2);

        app.rename_session(id, "Renamed");
        let stored = archive.stored().unwrap();
        assert!(stored.iter().any(|s| s.title == "Renamed"));

        app.delete_session(id);
        assert_eq!(archive.stored().unwrap().len(), 1);
    }

    #[test]
    fn selection_changes_are_not_persisted() {
        let (mut app, archive) = create_test_app();
        app.create_session();
        let saves_before = archive.save_count();
        let seed_id = app.store.sessions().last().unwrap().id;
        app.select_session(seed_id);
        assert_eq!(archive.save_count(), saves_before);
    }

    #[test]
    fn commit_and_resolve_each_persist_and_signal() {
        let (mut app, archive) = create_test_app();
        let id = app.create_session();
        app.ui.take_redraw();

        let handle = app
            .commit_user_turn(id, "Hello", "working".to_string())
            .unwrap();
        assert!(app.ui.take_redraw());
        let stored = archive.stored().unwrap();
        let committed = stored.iter().find(|s| s.id == id).unwrap();
        assert_eq!(committed.messages.len(), 2);
        assert!(committed.messages[1].is_pending());

        app.resolve_reply(
            handle,
            &Reply {
                text: "Hi there".to_string(),
                is_error: false,
            },
        );
        assert!(app.ui.take_redraw());
        let stored = archive.stored().unwrap();
        let resolved = stored.iter().find(|s| s.id == id).unwrap();
        assert_eq!(resolved.messages[1].text, "Hi there");
        assert!(!resolved.messages[1].is_pending());
    }

    #[test]
    fn restored_sessions_skip_the_seed_lifecycle() {
        use crate::core::app::App;
        use crate::core::session::Session;
        use crate::core::tools::ToolSelection;
        use crate::utils::logging::LoggingState;

        let archive = MemoryArchive::with_sessions(vec![Session::new(5), Session::new(2)]);
        let mut app = App::new(
            Box::new(archive),
            ToolSelection::default(),
            LoggingState::new(None).unwrap(),
        );
        app.store.activate();
        assert_eq!(app.store.active_id(), Some(5));
        assert!(!app.store.pending_first_interaction());
    }

    #[test]
    fn unreadable_archive_falls_back_to_a_fresh_store() {
        use crate::core::app::App;
        use crate::core::tools::ToolSelection;
        use crate::utils::logging::LoggingState;

        let archive = MemoryArchive::poisoned();
        let app = App::new(
            Box::new(archive),
            ToolSelection::default(),
            LoggingState::new(None).unwrap(),
        );
        assert_eq!(app.store.sessions().len(), 1);
        assert!(app.store.pending_first_interaction());
    }
}
