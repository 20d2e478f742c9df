//! Where memos and the index live.
//!
//! Resolution order: built-in defaults, then a TOML file (`$MEMO_CONFIG`, or
//! `~/.config/memo/config.toml` when present), then `$MEMO_DATA_DIR`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use memo_core::{MemoError, Result};
use serde::Deserialize;

use crate::paths::{expand_home, resolve_path};

pub const DEFAULT_BASE_PATH: &str = "~/.local/share/memo";
pub const DEFAULT_INDEX_FILE: &str = "index.dat";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root of the `<YYYY>/<MM>` tree. May start with `~`.
    pub base_path: String,
    /// Index file name, relative to `base_path`.
    pub index_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_base(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Load from the environment and the optional config file.
    pub fn load() -> Result<Self> {
        let explicit = env::var_os("MEMO_CONFIG").map(PathBuf::from);
        let mut config = match explicit.clone().or_else(default_config_path) {
            Some(path) => match fs::read_to_string(&path) {
                Ok(raw) => Self::from_toml_str(&raw, &path)?,
                Err(e) if e.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
                    Self::default()
                }
                Err(e) => {
                    return Err(MemoError::Config {
                        path,
                        message: e.to_string(),
                    });
                }
            },
            None => Self::default(),
        };

        if let Ok(dir) = env::var("MEMO_DATA_DIR")
            && !dir.is_empty()
        {
            config.base_path = dir;
        }
        tracing::debug!("store config: {config:?}");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str, path: &Path) -> Result<Self> {
        toml::from_str(raw).map_err(|e| MemoError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn base_dir(&self) -> PathBuf {
        expand_home(&self.base_path)
    }

    pub fn index_path(&self) -> PathBuf {
        self.base_dir().join(&self.index_file)
    }

    /// Month directory for a memo stamped `modified`.
    pub fn memo_dir(&self, modified: &str) -> Result<PathBuf> {
        resolve_path(&self.base_path, modified)
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(dir) = env::var("XDG_CONFIG_HOME")
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir).join("memo").join("config.toml"));
    }
    env::var("HOME")
        .ok()
        .filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(".config").join("memo").join("config.toml"))
}
