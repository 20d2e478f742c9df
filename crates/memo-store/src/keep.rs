//! Storing a memo: file under its month directory, then its index row.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use memo_core::{Codec, IndexEntry, JsonCodec, Memo, MemoError, Result};

use crate::config::StoreConfig;
use crate::index_store::{IndexLock, IndexStore, Upsert, write_atomic};
use crate::paths::memo_file;

#[derive(Clone, Debug)]
pub struct KeepOutcome {
    pub hash: String,
    pub memo_path: PathBuf,
    pub status: Upsert,
    /// Index size after the upsert.
    pub entries: usize,
}

/// Decode a memo from `input` and store it.
///
/// Callers writing the same index concurrently must pass clones of one
/// [`IndexLock`].
pub fn keep<R: Read>(input: R, config: &StoreConfig, lock: &IndexLock) -> Result<KeepOutcome> {
    let memo: Memo = JsonCodec.decode(input)?;
    keep_memo(&memo, config, &mut IndexStore::with_parts(lock.clone(), JsonCodec))
}

/// Store `memo` and record it in `index`.
///
/// The index lock is held from load to store; the memo file is written
/// before the index.
pub fn keep_memo<C: Codec>(
    memo: &Memo,
    config: &StoreConfig,
    index: &mut IndexStore<C>,
) -> Result<KeepOutcome> {
    let dir = config.memo_dir(&memo.modified)?;
    fs::create_dir_all(&dir).map_err(|e| MemoError::io(&dir, e))?;

    let hash = memo.hash()?;
    tracing::debug!("hashed {hash}");

    let index_path = config.index_path();
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent).map_err(|e| MemoError::io(parent, e))?;
    }

    let memo_path = memo_file(&dir, &hash);
    let status = index.update(&index_path, |index| {
        let mut body = Vec::new();
        memo.write_to(&mut body)?;
        write_atomic(&memo_path, &body)?;

        let entry = IndexEntry::from_memo(memo, dir.to_string_lossy());
        Ok(index.upsert(hash.clone(), entry))
    })?;

    tracing::info!(
        "kept {hash} ({status:?}), {} index entries",
        index.len()
    );
    Ok(KeepOutcome {
        hash,
        memo_path,
        status,
        entries: index.len(),
    })
}
