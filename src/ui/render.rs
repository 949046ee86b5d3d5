//! Line-oriented rendering of the session list and active transcript.

use std::io::{self, Write};

use crate::core::app::App;
use crate::core::compose;
use crate::core::message::{Message, Sender};
use crate::core::session::Session;

/// Redraw the whole view when the core signaled a change.
pub fn render_if_needed(app: &mut App) {
    if app.ui.take_redraw() {
        render(app);
    }
}

pub fn render(app: &App) {
    println!();
    for session in app.store.sessions() {
        let active = app.store.active_id() == Some(session.id);
        println!("{}", session_line(session, active));
    }
    println!();

    if let Some(session) = app.store.active_session() {
        for message in &session.messages {
            println!("{}", message_block(message));
        }
        if session.messages.is_empty() {
            println!("({})", compose::input_hint(app.tools.active()));
        }
    }
}

/// Print and clear the one-shot status notice, if any.
pub fn flush_status(app: &mut App) {
    if let Some(status) = app.ui.take_status() {
        println!("{status}");
    }
}

pub fn prompt(app: &App) -> io::Result<()> {
    print!("[{}] > ", app.tools.active());
    io::stdout().flush()
}

fn session_line(session: &Session, active: bool) -> String {
    let marker = if active { '*' } else { ' ' };
    format!(
        "{marker} [{}] {} ({} messages)",
        session.id,
        session.title,
        session.messages.len()
    )
}

fn message_block(message: &Message) -> String {
    match message.sender {
        Sender::User => format!("You: {}", message.text),
        Sender::Assistant => message.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;
    use crate::core::session::Session;

    #[test]
    fn active_session_line_is_marked() {
        let mut session = Session::new(3);
        session.messages.push(Message::user("hi"));
        assert_eq!(session_line(&session, true), "* [3] Session 3 (1 messages)");
        assert_eq!(session_line(&session, false), "  [3] Session 3 (1 messages)");
    }

    #[test]
    fn user_messages_carry_a_speaker_prefix() {
        assert_eq!(message_block(&Message::user("hi")), "You: hi");
        assert_eq!(message_block(&Message::assistant("hello")), "hello");
    }

    #[test]
    fn pending_indicator_is_shown_verbatim() {
        let pending = Message::pending("[CHAT Mode | Model: gemini-2.5-flash] Processing...");
        assert_eq!(
            message_block(&pending),
            "[CHAT Mode | Model: gemini-2.5-flash] Processing..."
        );
    }
}
