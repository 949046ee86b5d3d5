mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::app::App;
use crate::core::compose;
use crate::core::session::SessionId;
use crate::core::tools::ToolMode;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
    Quit,
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        let invocation = CommandInvocation {
            input: trimmed,
            args,
        };
        (command.handler)(app, invocation)
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from("Commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  /{:<9} {}\n", command.name, command.help));
    }
    help.push_str("Anything else is sent to the model.");
    app.ui.set_status(help);
    CommandResult::Continue
}

pub(super) fn handle_new(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let id = app.create_session();
    app.ui.set_status(format!("Session {id} started."));
    CommandResult::Continue
}

pub(super) fn handle_sessions(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut listing = String::from("Sessions:\n");
    for session in app.store.sessions() {
        let marker = if Some(session.id) == app.store.active_id() {
            '*'
        } else {
            ' '
        };
        listing.push_str(&format!(
            "{marker} [{}] {} ({} messages)\n",
            session.id,
            session.title,
            session.messages.len()
        ));
    }
    app.ui.set_status(listing.trim_end().to_string());
    CommandResult::Continue
}

pub(super) fn handle_switch(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.args.parse::<SessionId>() {
        // unknown ids are ignored, not reported
        Ok(id) => {
            app.select_session(id);
        }
        Err(_) => app.ui.set_status("Usage: /switch <id>"),
    }
    CommandResult::Continue
}

pub(super) fn handle_rename(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        app.ui.set_status("Usage: /rename [id] <new title>");
        return CommandResult::Continue;
    }

    let mut parts = invocation.args.splitn(2, ' ');
    let first = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    // a leading integer that names an existing session addresses it directly
    if let Ok(id) = first.parse::<SessionId>() {
        if app.store.session(id).is_some() {
            app.rename_session(id, rest);
            return CommandResult::Continue;
        }
    }

    if let Some(active) = app.store.active_id() {
        app.rename_session(active, invocation.args);
    }
    CommandResult::Continue
}

pub(super) fn handle_delete(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let target = if invocation.args.is_empty() {
        app.store.active_id()
    } else {
        match invocation.args.parse::<SessionId>() {
            Ok(id) => Some(id),
            Err(_) => {
                app.ui.set_status("Usage: /delete [id]");
                return CommandResult::Continue;
            }
        }
    };

    if let Some(id) = target {
        if app.delete_session(id) {
            app.ui.set_status(format!("Session {id} deleted."));
        }
    }
    CommandResult::Continue
}

pub(super) fn handle_tool(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        app.ui.set_status(tool_listing(app));
        return CommandResult::Continue;
    }

    match ToolMode::parse(invocation.args) {
        Some(mode) => {
            let notice = app.tools.select(mode);
            app.ui.mark_redraw();
            match notice {
                Some(notice) => app.ui.set_status(notice),
                None => app.ui.set_status(format!("Tool mode: {mode}")),
            }
        }
        // unrecognized names leave the selection untouched
        None => app.ui.set_status(tool_listing(app)),
    }
    CommandResult::Continue
}

fn tool_listing(app: &App) -> String {
    let mut listing = String::from("Tool modes:\n");
    for mode in ToolMode::all() {
        let marker = if *mode == app.tools.active() { '*' } else { ' ' };
        listing.push_str(&format!("{marker} {mode}\n"));
    }
    listing.push_str(&format!(
        "Input hint: {}",
        compose::input_hint(app.tools.active())
    ));
    listing
}

pub(super) fn handle_log(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let result = if invocation.args.is_empty() {
        app.logging.toggle_logging()
    } else {
        app.logging.set_log_file(invocation.args.to_string())
    };
    match result {
        Ok(message) => app.ui.set_status(message),
        Err(e) => app.ui.set_status(format!("Log error: {}", e)),
    }
    CommandResult::Continue
}

pub(super) fn handle_quit(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tools::UNSUPPORTED_TOOL_NOTICE;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn plain_text_is_forwarded_as_a_message() {
        let (mut app, _archive) = create_test_app();
        match process_input(&mut app, "hello there") {
            CommandResult::ProcessAsMessage(text) => assert_eq!(text, "hello there"),
            _ => panic!("expected message passthrough"),
        }
    }

    #[test]
    fn unknown_slash_commands_fall_through_as_messages() {
        let (mut app, _archive) = create_test_app();
        assert!(matches!(
            process_input(&mut app, "/frobnicate"),
            CommandResult::ProcessAsMessage(_)
        ));
    }

    #[test]
    fn new_command_creates_and_activates_a_session() {
        let (mut app, _archive) = create_test_app();
        let before = app.store.sessions().len();
        process_input(&mut app, "/new");
        assert_eq!(app.store.sessions().len(), before + 1);
        assert_eq!(app.store.active_id(), Some(app.store.sessions()[0].id));
    }

    #[test]
    fn switch_to_unknown_session_changes_nothing() {
        let (mut app, _archive) = create_test_app();
        app.store.activate();
        let active = app.store.active_id();
        process_input(&mut app, "/switch 42");
        assert_eq!(app.store.active_id(), active);
    }

    #[test]
    fn rename_addresses_a_session_by_leading_id() {
        let (mut app, _archive) = create_test_app();
        let id = app.create_session();
        process_input(&mut app, &format!("/rename {id} Field notes"));
        assert_eq!(app.store.session(id).unwrap().title, "Field notes");
    }

    #[test]
    fn rename_without_id_targets_the_active_session() {
        let (mut app, _archive) = create_test_app();
        let id = app.create_session();
        process_input(&mut app, "/rename 2026 planning");
        // "2026" is not an existing session id, so it is part of the title
        assert_eq!(app.store.session(id).unwrap().title, "2026 planning");
    }

    #[test]
    fn deleting_the_last_session_reseeds() {
        let (mut app, _archive) = create_test_app();
        app.store.activate();
        process_input(&mut app, "/delete");
        assert_eq!(app.store.sessions().len(), 1);
        assert_eq!(app.store.sessions()[0].title, "Initial Session");
        assert!(app.store.pending_first_interaction());
    }

    #[test]
    fn tool_command_sets_the_mode() {
        let (mut app, _archive) = create_test_app();
        process_input(&mut app, "/tool image");
        assert_eq!(app.tools.active(), ToolMode::Image);
        assert_eq!(app.ui.take_status().unwrap(), "Tool mode: image");
    }

    #[test]
    fn tool_command_surfaces_the_reports_notice() {
        let (mut app, _archive) = create_test_app();
        process_input(&mut app, "/tool reports");
        assert_eq!(app.tools.active(), ToolMode::Reports);
        assert_eq!(app.ui.take_status().unwrap(), UNSUPPORTED_TOOL_NOTICE);
    }

    #[test]
    fn unknown_tool_leaves_the_selection_untouched() {
        let (mut app, _archive) = create_test_app();
        process_input(&mut app, "/tool image");
        app.ui.take_status();
        process_input(&mut app, "/tool podcast");
        assert_eq!(app.tools.active(), ToolMode::Image);
    }

    #[test]
    fn quit_command_ends_the_loop() {
        let (mut app, _archive) = create_test_app();
        assert!(matches!(process_input(&mut app, "/quit"), CommandResult::Quit));
    }
}
