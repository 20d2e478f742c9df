use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use memo_core::{Codec, Entries, IndexEntry, JsonCodec, MemoError, Result};
use tempfile::NamedTempFile;

/// Exclusive access to an index file within this process.
///
/// Clones share the same mutex. Nothing stops a second process from writing
/// the same file.
#[derive(Clone, Debug, Default)]
pub struct IndexLock(Arc<Mutex<()>>);

impl IndexLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn acquire(&self) -> MutexGuard<'_, ()> {
        // the guarded value is `()`, nothing to corrupt
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outcome of [`IndexStore::upsert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Updated,
}

/// In-memory index with file persistence.
pub struct IndexStore<C: Codec = JsonCodec> {
    entries: Entries,
    lock: IndexLock,
    codec: C,
}

impl IndexStore<JsonCodec> {
    pub fn new() -> Self {
        Self::with_parts(IndexLock::new(), JsonCodec)
    }
}

impl Default for IndexStore<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> IndexStore<C> {
    pub fn with_parts(lock: IndexLock, codec: C) -> Self {
        Self {
            entries: Entries::new(),
            lock,
            codec,
        }
    }

    /// Merge the entries stored at `path`. A missing file is an empty index.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let lock = self.lock.clone();
        let _guard = lock.acquire();
        self.load_unlocked(path)
    }

    /// Replace the file at `path` with the full mapping.
    pub fn store(&self, path: &Path) -> Result<()> {
        let _guard = self.lock.acquire();
        self.store_unlocked(path)
    }

    /// Load `path`, apply `f` and store the result under one lock hold.
    ///
    /// `f` must not call [`IndexStore::load`] or [`IndexStore::store`]; the
    /// lock is not reentrant. Nothing is stored when `f` fails.
    pub fn update<T>(
        &mut self,
        path: &Path,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let lock = self.lock.clone();
        let _guard = lock.acquire();
        self.load_unlocked(path)?;
        let out = f(self)?;
        self.store_unlocked(path)?;
        Ok(out)
    }

    fn load_unlocked(&mut self, path: &Path) -> Result<()> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no index at {}, starting empty", path.display());
                return Ok(());
            }
            Err(e) => return Err(MemoError::io(path, e)),
        };
        let loaded: Entries = self.codec.decode(BufReader::new(file))?;
        tracing::debug!("loaded {} index entries from {}", loaded.len(), path.display());
        self.entries.extend(loaded);
        Ok(())
    }

    fn store_unlocked(&self, path: &Path) -> Result<()> {
        let bytes = self.codec.encode(&self.entries)?;
        write_atomic(path, &bytes)?;
        tracing::info!("stored {} index entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    pub fn upsert(&mut self, hash: impl Into<String>, entry: IndexEntry) -> Upsert {
        match self.entries.insert(hash.into(), entry) {
            None => Upsert::Added,
            Some(_) => Upsert::Updated,
        }
    }

    pub fn find(&self, hash: &str) -> Option<&IndexEntry> {
        self.entries.get(hash)
    }

    pub fn delete(&mut self, hash: &str) -> Result<IndexEntry> {
        self.entries
            .remove(hash)
            .ok_or_else(|| MemoError::NotFound(hash.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| MemoError::io(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| MemoError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| MemoError::io(path, e.error))?;
    Ok(())
}
