//! TUI-less listing of archived sessions

use std::error::Error;

use crate::core::archive::{FileArchive, SessionArchive};

pub fn list_sessions() -> Result<(), Box<dyn Error>> {
    let archive = FileArchive::new(FileArchive::default_path());
    match archive.load()? {
        Some(sessions) if !sessions.is_empty() => {
            for session in &sessions {
                println!(
                    "[{}] {} ({} messages)",
                    session.id,
                    session.title,
                    session.messages.len()
                );
            }
        }
        _ => println!("No archived sessions yet."),
    }
    Ok(())
}
