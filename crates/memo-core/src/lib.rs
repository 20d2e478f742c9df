//! Memo toolbox core.
//!
//! Memos are small tagged notes addressed by the SHA-256 of their content.
//! This crate holds the record types, the hasher, the index filters and the
//! stream transforms that only need their input. Filesystem work lives in
//! `memo-store`.

pub mod codec;
pub mod error;
pub mod hash;
pub mod index;
pub mod memo;
pub mod period;
pub mod pipeline;
pub mod query;
pub mod render;
pub mod time;
pub mod transform;

pub use codec::{Codec, JsonCodec};
pub use error::{ERROR_PREFIX, MaskedError, MemoError, Result};
pub use hash::content_hash;
pub use index::{Entries, IndexEntry, TagSet};
pub use memo::Memo;
pub use period::Period;
pub use pipeline::Pipeline;
pub use query::{filter_by_period, filter_by_tags};
pub use render::{Verbosity, render_memo};
pub use time::{TIMESTAMP_FORMAT, now_timestamp, parse_timestamp, year_month};
pub use transform::{capture, capture_at, tag_it, tagged};
