//! Delivery of export files.

use std::fs;
use std::path::PathBuf;

use crate::error::Result;

use super::ExportFile;

/// Where an export goes once generated.
///
/// In a browser host this would trigger a download; here it is whatever the
/// embedding application plugs in.
pub trait ExportSink {
    /// Deliver a file. Returns a human-readable location.
    fn deliver(&mut self, file: &ExportFile) -> Result<String>;
}

/// Writes exports into a directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, file: &ExportFile) -> Result<String> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.filename);
        fs::write(&path, &file.bytes)?;
        Ok(path.display().to_string())
    }
}

/// Keeps exports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<ExportFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ExportFile> {
        self.files.last()
    }
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, file: &ExportFile) -> Result<String> {
        self.files.push(file.clone());
        Ok(format!("memory:{}", file.filename))
    }
}
