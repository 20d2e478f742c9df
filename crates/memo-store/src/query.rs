//! Steps that read stored data: period queries over the index file and
//! rendering of the memos an index stream points at.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use memo_core::{
    Codec, Entries, JsonCodec, Memo, MemoError, Period, Pipeline, Result, Verbosity,
    filter_by_period, render_memo,
};

use crate::paths::memo_file;

/// Read the index at `index_path` and keep the entries within `period`.
///
/// The period is validated before the file is touched.
pub fn from_period(period: &str, index_path: &Path) -> Pipeline {
    let run = || -> Result<Vec<u8>> {
        let period: Period = period.parse()?;
        let file = File::open(index_path).map_err(|e| MemoError::io(index_path, e))?;
        let entries: Entries = JsonCodec.decode(BufReader::new(file))?;
        tracing::debug!("read {} entries from {}", entries.len(), index_path.display());
        let kept = filter_by_period(entries, period)?;
        JsonCodec.encode(&kept)
    };
    run().into()
}

/// Print every memo referenced by the index stream.
///
/// All memo files are read before anything is rendered, so one missing file
/// fails the step without partial output.
pub fn render<R: Read>(input: R, verbosity: Verbosity) -> Pipeline {
    let run = || -> Result<Vec<u8>> {
        let entries: Entries = JsonCodec.decode(input)?;
        let memos = entries
            .iter()
            .map(|(hash, entry)| read_memo(&memo_file(Path::new(&entry.path), hash)))
            .collect::<Result<Vec<_>>>()?;

        let mut out = String::new();
        for memo in &memos {
            render_memo(&mut out, memo, verbosity);
        }
        Ok(out.into_bytes())
    };
    run().into()
}

fn read_memo(path: &Path) -> Result<Memo> {
    let file = File::open(path).map_err(|e| MemoError::io(path, e))?;
    Memo::read_from(BufReader::new(file))
}
