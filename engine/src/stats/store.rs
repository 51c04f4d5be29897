use std::path::{Path, PathBuf};

use crate::log;

use super::score_record::ScoreRecord;

#[derive(Debug)]
pub enum ScoreStoreError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ScoreStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreStoreError::IoError(e) => write!(f, "IO error: {}", e),
            ScoreStoreError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ScoreStoreError {}

impl From<std::io::Error> for ScoreStoreError {
    fn from(e: std::io::Error) -> Self {
        ScoreStoreError::IoError(e)
    }
}

impl From<serde_json::Error> for ScoreStoreError {
    fn from(e: serde_json::Error) -> Self {
        ScoreStoreError::ParseError(e)
    }
}

/// File-backed score tally. Loaded once at session start, written
/// synchronously after every completed game. Single writer assumed;
/// a multi-session deployment would need file locking on top.
pub struct ScoreStore {
    path: PathBuf,
    record: ScoreRecord,
}

impl ScoreStore {
    /// Opens the store, substituting a fresh record when the file is
    /// missing or unreadable. A corrupt file is logged, never fatal.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = match load_record(&path) {
            Ok(Some(record)) => record,
            Ok(None) => ScoreRecord::default(),
            Err(e) => {
                log!("Failed to load score file {}: {}", path.display(), e);
                ScoreRecord::default()
            }
        };
        Self { path, record }
    }

    pub fn record(&self) -> &ScoreRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut ScoreRecord {
        &mut self.record
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), ScoreStoreError> {
        let json = serde_json::to_string(&self.record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Ok(None) when the file does not exist yet; errors are reserved for
/// files that exist but cannot be read or parsed.
fn load_record(path: &Path) -> Result<Option<ScoreRecord>, ScoreStoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let record = serde_json::from_str(&content)?;
    Ok(Some(record))
}
