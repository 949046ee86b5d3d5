use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub input: &'a str,
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        help: "Show available commands and usage information.",
        handler: super::handle_help,
    },
    Command {
        name: "new",
        help: "Start a new session and make it active.",
        handler: super::handle_new,
    },
    Command {
        name: "sessions",
        help: "List sessions with their ids and message counts.",
        handler: super::handle_sessions,
    },
    Command {
        name: "switch",
        help: "Switch to the session with the given id.",
        handler: super::handle_switch,
    },
    Command {
        name: "rename",
        help: "Rename a session: /rename [id] <new title>.",
        handler: super::handle_rename,
    },
    Command {
        name: "delete",
        help: "Delete a session: /delete [id] (defaults to the active one).",
        handler: super::handle_delete,
    },
    Command {
        name: "tool",
        help: "Show or set the tool mode applied to outgoing prompts.",
        handler: super::handle_tool,
    },
    Command {
        name: "log",
        help: "Toggle transcript logging or set the log file path.",
        handler: super::handle_log,
    },
    Command {
        name: "quit",
        help: "Leave the chat.",
        handler: super::handle_quit,
    },
];
