//! The interactive chat loop.
//!
//! One `tokio::select!` over two event sources: lines typed on stdin and
//! resolutions arriving from in-flight dispatches. Between committing a turn
//! and its resolution the loop keeps serving unrelated input (switching
//! sessions, opening the tool listing); only a second send into the same
//! session is refused.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::client::GenerateContent;
use crate::commands::{self, CommandResult};
use crate::core::app::App;
use crate::core::dispatch::{begin_send, DispatchEvent, DispatchService, SendDisposition};
use crate::ui::render;
use crate::utils::input::sanitize_line;

pub async fn run_chat(
    mut app: App,
    client: Option<Arc<dyn GenerateContent>>,
) -> Result<(), Box<dyn Error>> {
    let (dispatcher, mut events) = DispatchService::new();

    app.store.activate();
    render::render_if_needed(&mut app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        render::prompt(&app)?;
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match commands::process_input(&mut app, &line) {
                    CommandResult::Quit => break,
                    CommandResult::Continue => {}
                    CommandResult::ProcessAsMessage(text) => {
                        match begin_send(&mut app, &sanitize_line(&text)) {
                            SendDisposition::Ignored => {}
                            SendDisposition::Rejected(notice) => app.ui.set_status(notice),
                            SendDisposition::Committed { handle, prompt } => {
                                // the pending indicator must be visible
                                // before the call resolves
                                render::render_if_needed(&mut app);
                                dispatcher.spawn_generate(client.clone(), prompt, handle);
                            }
                        }
                    }
                }
            }
            Some(event) = events.recv() => {
                let DispatchEvent::Resolved { handle, reply } = event;
                app.resolve_reply(handle, &reply);
            }
        }
        render::flush_status(&mut app);
        render::render_if_needed(&mut app);
    }

    Ok(())
}
