#[cfg(test)]
use std::path::PathBuf;
#[cfg(test)]
use std::sync::{Arc, Mutex};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use crate::api::client::{GenerateContent, TransportError};
#[cfg(test)]
use crate::api::{GenerateContentRequest, GenerateContentResponse};
#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::core::archive::{ArchiveError, SessionArchive};
#[cfg(test)]
use crate::core::session::Session;
#[cfg(test)]
use crate::core::tools::ToolSelection;
#[cfg(test)]
use crate::utils::logging::LoggingState;

/// Archive backed by memory, shared between the app under test and the test
/// body so assertions can inspect what was flushed.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryArchive {
    inner: Arc<Mutex<ArchiveState>>,
}

#[cfg(test)]
#[derive(Default)]
struct ArchiveState {
    sessions: Option<Vec<Session>>,
    save_count: usize,
    unreadable: bool,
}

#[cfg(test)]
impl MemoryArchive {
    pub fn with_sessions(sessions: Vec<Session>) -> Self {
        let archive = Self::default();
        archive.inner.lock().unwrap().sessions = Some(sessions);
        archive
    }

    /// An archive whose load always fails, as a corrupt file would.
    pub fn poisoned() -> Self {
        let archive = Self::default();
        archive.inner.lock().unwrap().unreadable = true;
        archive
    }

    pub fn stored(&self) -> Option<Vec<Session>> {
        self.inner.lock().unwrap().sessions.clone()
    }

    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap().save_count
    }
}

#[cfg(test)]
impl SessionArchive for MemoryArchive {
    fn load(&self) -> Result<Option<Vec<Session>>, ArchiveError> {
        let state = self.inner.lock().unwrap();
        if state.unreadable {
            return Err(ArchiveError::Parse {
                path: PathBuf::from("<memory>"),
                source: serde_json::from_str::<Vec<Session>>("corrupt").unwrap_err(),
            });
        }
        Ok(state.sessions.clone())
    }

    fn save(&self, sessions: &[Session]) -> Result<(), Box<dyn std::error::Error>> {
        let mut state = self.inner.lock().unwrap();
        state.sessions = Some(sessions.to_vec());
        state.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
pub fn create_test_app() -> (App, MemoryArchive) {
    let archive = MemoryArchive::default();
    let app = App::new(
        Box::new(archive.clone()),
        ToolSelection::default(),
        LoggingState::new(None).unwrap(),
    );
    (app, archive)
}

/// Transport double that answers every call with the same canned body.
#[cfg(test)]
pub struct CannedClient {
    body: String,
}

#[cfg(test)]
impl CannedClient {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn success(text: &str) -> Self {
        Self::new(
            serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": text}]}}]
            })
            .to_string(),
        )
    }
}

#[cfg(test)]
#[async_trait]
impl GenerateContent for CannedClient {
    async fn generate(
        &self,
        _model: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        Ok(canned_response(&self.body))
    }
}

#[cfg(test)]
pub fn canned_response(body: &str) -> GenerateContentResponse {
    serde_json::from_str(body).unwrap()
}

#[cfg(test)]
pub fn failing_transport() -> TransportError {
    TransportError::MalformedBody(
        serde_json::from_str::<GenerateContentResponse>("<html>down</html>").unwrap_err(),
    )
}
