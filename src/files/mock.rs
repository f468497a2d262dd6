use crate::error::{BumpVersionError, Result};
use crate::files::FileSystem;
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory file system for testing without touching disk
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    directories: Mutex<BTreeSet<PathBuf>>,
    writes: Mutex<Vec<PathBuf>>,
    current_directory: PathBuf,
}

impl MemoryFileSystem {
    /// Create an empty file system rooted at `/`
    pub fn new() -> Self {
        Self::with_current_directory("/")
    }

    /// Create an empty file system with the given working directory
    pub fn with_current_directory(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let mut directories = BTreeSet::new();
        directories.insert(dir.clone());
        MemoryFileSystem {
            files: Mutex::new(HashMap::new()),
            directories: Mutex::new(directories),
            writes: Mutex::new(Vec::new()),
            current_directory: dir,
        }
    }

    /// Seed a file without recording it as a write
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), contents.into());
        }
    }

    /// Register an empty directory
    pub fn add_directory(&self, path: impl Into<PathBuf>) {
        if let Ok(mut dirs) = self.directories.lock() {
            dirs.insert(path.into());
        }
    }

    /// Current contents of `path`, if any
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .ok()
            .and_then(|files| files.get(path.as_ref()).cloned())
    }

    /// Paths written through [FileSystem::write], in order
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let is_file = self
            .files
            .lock()
            .map(|files| files.contains_key(path))
            .unwrap_or(false);
        is_file || self.is_directory(path)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.contents(path).ok_or_else(|| {
            BumpVersionError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }

    fn write(&self, contents: &[u8], path: &Path) -> Result<()> {
        let text = String::from_utf8_lossy(contents).into_owned();
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.to_path_buf(), text);
        }
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(path.to_path_buf());
        }
        Ok(())
    }

    fn is_directory(&self, path: &Path) -> bool {
        let explicit = self
            .directories
            .lock()
            .map(|dirs| dirs.iter().any(|d| d == path || d.starts_with(path)))
            .unwrap_or(false);
        explicit
            || self
                .files
                .lock()
                .map(|files| files.keys().any(|f| f != path && f.starts_with(path)))
                .unwrap_or(false)
    }

    fn current_directory(&self) -> Result<PathBuf> {
        Ok(self.current_directory.clone())
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}
