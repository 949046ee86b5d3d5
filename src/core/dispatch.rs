//! The send lifecycle: guard, intake, compose, commit, dispatch, resolve.
//!
//! A send never fails outward. Every path either leaves the transcript
//! untouched (guards and empty input) or ends with the pending placeholder
//! settled into a final or error message.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::client::{GenerateContent, TransportError};
use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::core::app::App;
use crate::core::compose::{self, ComposedPrompt};
use crate::core::session::PlaceholderHandle;
use crate::core::tools::{ToolMode, UNSUPPORTED_TOOL_NOTICE};

pub const MISSING_KEY_ERROR: &str =
    "[ERROR] API Key is not set. Please ensure the GEMINI_API_KEY variable has your actual key.";
pub const UNEXPECTED_RESPONSE_ERROR: &str =
    "[Error] Received an unexpected response from the API.";
pub const CONNECTIVITY_ERROR: &str =
    "[FETCH ERROR] Could not connect to the server. Check your network or console for details.";
pub const REPLY_PENDING_NOTICE: &str =
    "A reply is still pending for this session. Wait for it to arrive.";

/// Terminal text for one completed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub is_error: bool,
}

/// What `begin_send` decided to do with one line of user input.
#[derive(Debug)]
pub enum SendDisposition {
    /// Input was empty after trimming; nothing changed.
    Ignored,
    /// The send was refused before any transcript mutation.
    Rejected(&'static str),
    /// The user turn and placeholder are committed; the request is ready to
    /// go out.
    Committed {
        handle: PlaceholderHandle,
        prompt: ComposedPrompt,
    },
}

/// Text of the provisional assistant entry shown while the call is
/// outstanding.
pub fn processing_indicator(mode: ToolMode, model: &str) -> String {
    format!("[{} Mode | Model: {}] Processing...", mode.label(), model)
}

/// Steps 1-4 of the send lifecycle: guards, intake, composition, and the
/// transcript commit. Runs synchronously so the pending indicator is
/// observable (and persisted) before the network is touched.
pub fn begin_send(app: &mut App, input: &str) -> SendDisposition {
    let mode = app.tools.active();
    if mode == ToolMode::Reports {
        return SendDisposition::Rejected(UNSUPPORTED_TOOL_NOTICE);
    }

    let text = input.trim();
    if text.is_empty() {
        return SendDisposition::Ignored;
    }

    app.store.activate();
    if app.store.pending_first_interaction() {
        // the seed session is never written into directly
        app.create_session();
    }
    let Some(session_id) = app.store.active_id() else {
        return SendDisposition::Ignored;
    };

    if app.store.has_pending_reply(session_id) {
        return SendDisposition::Rejected(REPLY_PENDING_NOTICE);
    }

    let prompt = compose::compose(text, mode);
    let indicator = processing_indicator(mode, prompt.model);
    match app.commit_user_turn(session_id, text, indicator) {
        Some(handle) => {
            debug!(session = session_id, model = prompt.model, "turn committed");
            SendDisposition::Committed { handle, prompt }
        }
        // unreachable after the pending check above, but never half-commit
        None => SendDisposition::Rejected(REPLY_PENDING_NOTICE),
    }
}

/// Map one transport outcome onto the reply that settles the placeholder.
pub fn interpret_outcome(
    outcome: Result<GenerateContentResponse, TransportError>,
) -> Reply {
    match outcome {
        Ok(response) => {
            if let Some(text) = response.first_candidate_text() {
                Reply {
                    text: text.to_string(),
                    is_error: false,
                }
            } else if let Some(error) = response.error {
                Reply {
                    text: format!("[API Error] {}", error.message),
                    is_error: true,
                }
            } else {
                Reply {
                    text: UNEXPECTED_RESPONSE_ERROR.to_string(),
                    is_error: true,
                }
            }
        }
        Err(err) => {
            warn!("generateContent transport failure: {err}");
            Reply {
                text: CONNECTIVITY_ERROR.to_string(),
                is_error: true,
            }
        }
    }
}

/// Completion notices from in-flight dispatches, delivered to the chat loop.
#[derive(Debug)]
pub enum DispatchEvent {
    Resolved {
        handle: PlaceholderHandle,
        reply: Reply,
    },
}

/// Hands committed turns to the transport on a background task and reports
/// each resolution back over a channel, so the loop stays responsive while a
/// call is outstanding.
#[derive(Clone)]
pub struct DispatchService {
    tx: mpsc::UnboundedSender<DispatchEvent>,
}

impl DispatchService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DispatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Step 5 of the lifecycle. Without a usable client the configuration
    /// error resolves the turn immediately and nothing touches the network.
    pub fn spawn_generate(
        &self,
        client: Option<Arc<dyn GenerateContent>>,
        prompt: ComposedPrompt,
        handle: PlaceholderHandle,
    ) {
        let tx = self.tx.clone();
        let Some(client) = client else {
            let _ = tx.send(DispatchEvent::Resolved {
                handle,
                reply: Reply {
                    text: MISSING_KEY_ERROR.to_string(),
                    is_error: true,
                },
            });
            return;
        };

        tokio::spawn(async move {
            let request = GenerateContentRequest::from_text(prompt.request_text);
            let outcome = client.generate(prompt.model, &request).await;
            let _ = tx.send(DispatchEvent::Resolved {
                handle,
                reply: interpret_outcome(outcome),
            });
        });
    }
}
