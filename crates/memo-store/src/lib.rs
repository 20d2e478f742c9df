//! Persistence for the memo toolbox.
//!
//! Layout:
//! ```text
//! ~/.local/share/memo/
//! ├── index.dat
//! └── <YYYY>/<MM>/<hash>.memo
//! ```

pub mod config;
pub mod index_store;
pub mod keep;
pub mod paths;
pub mod query;

pub use config::{DEFAULT_BASE_PATH, DEFAULT_INDEX_FILE, StoreConfig};
pub use index_store::{IndexLock, IndexStore, Upsert};
pub use keep::{KeepOutcome, keep, keep_memo};
pub use paths::{expand_home, expand_home_with, memo_file, resolve_path};
pub use query::{from_period, render};
