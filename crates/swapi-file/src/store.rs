//! Filesystem storage for the response cache.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use fs2::FileExt;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, trace, warn};

use swapi_core::error::{CacheError, Error};
use swapi_core::{Cache, Result};

/// Directory below the cache root holding one file per entry.
pub const ENTRIES_DIR: &str = "entries";

const ENTRY_EXT: &str = "json";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

fn map_io(err: std::io::Error) -> Error {
    Error::Cache(CacheError::from(err))
}

/// A [`Cache`] persisted as one file per entry below a directory.
///
/// Entry files are named by the SHA-256 of their key and replaced
/// atomically, so a `set` only ever writes its own value. Entries are read
/// lazily and remembered by the instance that read or wrote them.
///
/// Writers hold a shared lock on `cache.lock`; [`clear`](Self::clear)
/// takes it exclusively.
#[derive(Debug)]
pub struct FileCache {
    root: PathBuf,
    seen: RwLock<HashMap<String, String>>,
}

impl FileCache {
    /// Open (or create) a cache in the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(ENTRIES_DIR)).map_err(map_io)?;
        debug!("Opened file cache");

        Ok(Self {
            root,
            seen: RwLock::new(HashMap::new()),
        })
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the directory holding the entry files.
    pub fn entries_dir(&self) -> PathBuf {
        self.root.join(ENTRIES_DIR)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.entries_dir()
            .join(format!("{}.{}", hex::encode(digest), ENTRY_EXT))
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("cache.lock")
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entry_files().map(|files| files.len()).unwrap_or(0)
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry, returning how many there were.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<usize> {
        self.with_lock(true, || {
            let files = self.entry_files()?;
            for file in &files {
                match fs::remove_file(file) {
                    Err(e) if e.kind() != ErrorKind::NotFound => return Err(map_io(e)),
                    _ => {}
                }
            }
            self.seen.write().unwrap_or_else(|e| e.into_inner()).clear();
            debug!(removed = files.len(), "Cleared file cache");
            Ok(files.len())
        })
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>> {
        let dir = match fs::read_dir(self.entries_dir()) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io(e)),
        };

        let mut files = Vec::new();
        for entry in dir {
            let path = entry.map_err(map_io)?.path();
            if path.extension().is_some_and(|ext| ext == ENTRY_EXT) {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn with_lock<T>(&self, exclusive: bool, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;

        if exclusive {
            lock_file.lock_exclusive().map_err(map_io)?;
        } else {
            lock_file.lock_shared().map_err(map_io)?;
        }
        let result = f();
        lock_file.unlock().map_err(map_io)?;

        result
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self
            .seen
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
        {
            return Ok(Some(value.clone()));
        }

        let path = self.entry_path(key);
        let value = match fs::read_to_string(&path) {
            Ok(value) => value,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %path.display(), "unreadable cache entry");
                return Ok(None);
            }
            Err(e) => return Err(map_io(e)),
        };

        self.seen
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.clone());
        Ok(Some(value))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        let temp_path = path.with_extension(format!(
            "{}-{}.tmp",
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        self.with_lock(false, || {
            fs::write(&temp_path, value).map_err(map_io)?;
            fs::rename(&temp_path, &path).map_err(map_io)
        })?;

        trace!(path = %path.display(), "Wrote cache entry");
        self.seen
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
