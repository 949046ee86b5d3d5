use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::session::Session;

/// Errors that can occur when loading the session archive from disk.
#[derive(Debug)]
pub enum ArchiveError {
    /// Failed to read the archive file from disk.
    Read {
        /// Path to the archive file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the archive file as valid JSON.
    Parse {
        /// Path to the archive file with invalid JSON.
        path: PathBuf,
        /// The JSON deserialization error.
        source: serde_json::Error,
    },
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::Read { path, source } => {
                write!(
                    f,
                    "Failed to read session archive at {}: {}",
                    path.display(),
                    source
                )
            }
            ArchiveError::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse session archive at {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl StdError for ArchiveError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ArchiveError::Read { source, .. } => Some(source),
            ArchiveError::Parse { source, .. } => Some(source),
        }
    }
}

/// Key-value persistence contract for the session collection: one serialized
/// blob holding every session, written after each committing mutation.
pub trait SessionArchive {
    /// `Ok(None)` means no archive exists yet (first run).
    fn load(&self) -> Result<Option<Vec<Session>>, ArchiveError>;

    fn save(&self, sessions: &[Session]) -> Result<(), Box<dyn std::error::Error>>;
}

/// Archive backed by a single JSON file under the platform data directory.
pub struct FileArchive {
    path: PathBuf,
}

impl FileArchive {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "permacommons", "causerie")
            .expect("could not determine data directory");
        proj_dirs.data_dir().join("sessions.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionArchive for FileArchive {
    fn load(&self) -> Result<Option<Vec<Session>>, ArchiveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| ArchiveError::Read {
            path: self.path.clone(),
            source,
        })?;
        let sessions: Vec<Session> =
            serde_json::from_str(&contents).map_err(|source| ArchiveError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(count = sessions.len(), "loaded session archive");
        Ok(Some(sessions))
    }

    fn save(&self, sessions: &[Session]) -> Result<(), Box<dyn std::error::Error>> {
        let parent = self.path.parent().filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(sessions)?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };
        temp_file.write_all(contents.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.path)?;
        debug!(count = sessions.len(), "saved session archive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;

    fn sample_sessions() -> Vec<Session> {
        let mut chatty = Session::new(2);
        chatty.title = "Hello".to_string();
        chatty.messages.push(Message::user("Hello"));
        chatty.messages.push(Message::assistant("Hi there"));
        vec![chatty, Session::new(1)]
    }

    #[test]
    fn missing_archive_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FileArchive::new(dir.path().join("sessions.json"));
        assert!(archive.load().unwrap().is_none());
    }

    #[test]
    fn archive_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FileArchive::new(dir.path().join("sessions.json"));
        let sessions = sample_sessions();

        archive.save(&sessions).unwrap();
        let loaded = archive.load().unwrap().unwrap();
        assert_eq!(loaded, sessions);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FileArchive::new(dir.path().join("nested/deeper/sessions.json"));
        archive.save(&sample_sessions()).unwrap();
        assert!(archive.path().exists());
    }

    #[test]
    fn corrupt_archive_reports_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(&path, "not json at all").unwrap();
        let archive = FileArchive::new(path);
        assert!(matches!(
            archive.load(),
            Err(ArchiveError::Parse { .. })
        ));
    }

    #[test]
    fn statuses_survive_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FileArchive::new(dir.path().join("sessions.json"));
        let mut session = Session::new(1);
        session.messages.push(Message::user("q"));
        session.messages.push(Message::pending("working"));
        let sessions = vec![session];

        archive.save(&sessions).unwrap();
        assert_eq!(archive.load().unwrap().unwrap(), sessions);
    }
}
