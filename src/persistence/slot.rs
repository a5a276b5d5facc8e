//! Storage for the single save slot

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::Result;
use crate::persistence::blob::SAVE_SLOT_NAME;

/// Where a save blob lives
pub trait SaveSlot {
    fn name(&self) -> &str;

    /// Stored contents, or `None` when nothing has been saved
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored contents in one step
    fn write(&mut self, contents: &str) -> Result<()>;
}

/// In-memory slot for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SaveSlot for MemorySlot {
    fn name(&self) -> &str {
        SAVE_SLOT_NAME
    }

    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

/// JSON file on disk, written via a temp file and rename
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/epic-battle-save.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", SAVE_SLOT_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveSlot for FileSlot {
    fn name(&self) -> &str {
        SAVE_SLOT_NAME
    }

    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, contents)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}
