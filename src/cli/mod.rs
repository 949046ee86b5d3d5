//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod session_list;

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::api::client::{GenerateContent, HttpGenerateClient};
use crate::auth;
use crate::cli::session_list::list_sessions;
use crate::core::app::App;
use crate::core::archive::{FileArchive, SessionArchive};
use crate::core::config::Config;
use crate::core::tools::{ToolMode, ToolSelection};
use crate::ui::repl::run_chat;
use crate::utils::logging::LoggingState;

#[derive(Parser)]
#[command(name = "causerie")]
#[command(about = "A terminal chat workspace for Google's generative-language API")]
#[command(
    long_about = "Causerie is a terminal chat workspace that keeps named sessions and applies \
tool-mode transforms to outgoing prompts before sending them to Google's generative-language \
API.\n\n\
Authentication:\n\
  Use 'causerie auth' to store your API key securely in the system keyring.\n\n\
Environment Variables (fallback if no auth configured):\n\
  GEMINI_API_KEY    Your Gemini API key\n\n\
Commands inside the chat:\n\
  /new              Start a new session\n\
  /sessions         List sessions\n\
  /switch <id>      Switch to a session\n\
  /rename [id] <t>  Rename a session\n\
  /delete [id]      Delete a session\n\
  /tool [mode]      Show or set the tool mode\n\
  /log [filename]   Toggle transcript logging or set the log file\n\
  /help             Show all commands\n\
  /quit             Leave the chat"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Tool mode to start with (none, presentation, image, reports)
    #[arg(short = 't', long, global = true, value_name = "TOOL")]
    pub tool: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the Gemini API key
    Auth,
    /// Remove the stored Gemini API key
    Deauth,
    /// Start the chat interface (default)
    Chat,
    /// List archived sessions
    Sessions,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let mut args = Args::parse();

    match args.command.take().unwrap_or(Commands::Chat) {
        Commands::Auth => {
            let mut config = Config::load()?;
            if let Err(e) = auth::interactive_auth(&mut config) {
                eprintln!("❌ Authentication failed: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Deauth => {
            let mut config = Config::load()?;
            if let Err(e) = auth::interactive_deauth(&mut config) {
                eprintln!("❌ Deauthentication failed: {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Sessions => list_sessions(),
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "default-tool" => {
                    match value.as_deref() {
                        Some(name) => match ToolMode::parse(name) {
                            Some(mode) => {
                                config.default_tool = Some(mode.as_str().to_string());
                                config.save()?;
                                println!("✅ Set default-tool to: {mode}");
                            }
                            None => {
                                eprintln!("⚠️  Unknown tool mode: {name}");
                                eprintln!("Available modes: none, presentation, image, reports");
                                std::process::exit(1);
                            }
                        },
                        None => {
                            let current = config.default_tool.as_deref().unwrap_or("none");
                            println!("default-tool = {current}");
                        }
                    }
                    Ok(())
                }
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "default-tool" => {
                    config.default_tool = None;
                    config.save()?;
                    println!("✅ Unset default-tool");
                    Ok(())
                }
                _ => {
                    eprintln!("❌ Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Chat => run_interactive(args).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_interactive(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    let mut tools = ToolSelection::default();
    if let Some(name) = args.tool.as_deref().or(config.default_tool.as_deref()) {
        match ToolMode::parse(name) {
            Some(mode) => {
                if let Some(notice) = tools.select(mode) {
                    println!("{notice}");
                }
            }
            None => eprintln!("Unknown tool mode: {name}"),
        }
    }

    let logging = LoggingState::new(args.log)?;
    let archive: Box<dyn SessionArchive> =
        Box::new(FileArchive::new(FileArchive::default_path()));
    let app = App::new(archive, tools, logging);

    let client: Option<Arc<dyn GenerateContent>> = match auth::resolve_api_key(&config) {
        Some(key) if auth::is_usable_key(&key) => Some(Arc::new(HttpGenerateClient::new(key))),
        _ => {
            eprintln!(
                "No usable Gemini API key configured. Sends will report a configuration error \
until you run `causerie auth` or set GEMINI_API_KEY."
            );
            None
        }
    };

    run_chat(app, client).await
}
