//! Causerie is a terminal chat workspace for Google's generative-language API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state: the session store and archive, tool-mode
//!   selection, prompt composition, and the send/dispatch lifecycle.
//! - [`ui`] renders the line-oriented terminal view and runs the interactive
//!   loop that drives user input and display updates.
//! - [`commands`] implements slash-command parsing and command execution used
//!   by the chat loop.
//! - [`api`] defines the generateContent payloads and the HTTP client used to
//!   reach the remote endpoint.
//! - [`auth`] resolves and stores the API credential.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`core::app`] and [`ui::repl`] for interactive sessions.

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
