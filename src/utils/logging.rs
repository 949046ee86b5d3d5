use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;

/// Opt-in transcript logging to an append-only file.
///
/// Distinct from the `tracing` diagnostics: this records the conversation
/// itself, one timestamped block per turn, and can be paused and resumed from
/// the chat loop without losing the configured path.
pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState {
            file_path: log_file,
            is_active: false,
        };

        // A file provided on the command line enables logging immediately
        if let Some(path) = logging.file_path.clone() {
            logging.test_file_access(&path)?;
            logging.is_active = true;
        }

        Ok(logging)
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        self.test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;

        Ok(format!("Logging enabled to: {}", path))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                self.is_active = !self.is_active;
                if self.is_active {
                    Ok(format!("Logging resumed to: {}", path))
                } else {
                    Ok(format!("Logging paused (file: {})", path))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    /// Append one turn to the log file, if logging is active.
    pub fn log_turn(&self, speaker: &str, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref().filter(|_| self.is_active) else {
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{stamp}] {speaker}:")?;
        for line in content.lines() {
            writeln!(file, "{line}")?;
        }
        writeln!(file)?;

        file.flush()?;
        Ok(())
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            (Some(path), false) => format!(
                "paused ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_disabled_without_a_file() {
        let logging = LoggingState::new(None).unwrap();
        assert_eq!(logging.get_status_string(), "disabled");
        // No file configured: logging a turn is a no-op, not an error
        logging.log_turn("You", "hello").unwrap();
    }

    #[test]
    fn turns_are_written_with_speaker_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.display().to_string())).unwrap();

        logging.log_turn("You", "hello\nthere").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("You:"));
        assert!(contents.contains("hello\nthere\n"));
    }

    #[test]
    fn toggle_requires_a_configured_file() {
        let mut logging = LoggingState::new(None).unwrap();
        assert!(logging.toggle_logging().is_err());
    }

    #[test]
    fn paused_logging_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.log");
        let mut logging = LoggingState::new(Some(path.display().to_string())).unwrap();

        logging.toggle_logging().unwrap();
        logging.log_turn("You", "invisible").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.is_empty());
    }
}
