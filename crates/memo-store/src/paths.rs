use std::env;
use std::path::{Path, PathBuf};

use memo_core::{Result, year_month};

/// Replace a leading `~` with `$HOME`. Left untouched when `HOME` is unset.
pub fn expand_home(path: &str) -> PathBuf {
    let home = env::var("HOME").ok();
    expand_home_with(path, home.as_deref())
}

/// [`expand_home`] with an explicit home directory.
pub fn expand_home_with(path: &str, home: Option<&str>) -> PathBuf {
    let Some(home) = home.filter(|h| !h.is_empty()) else {
        return PathBuf::from(path);
    };
    if path == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = path.strip_prefix("~/") {
        Path::new(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Directory for a memo: `<base>/<YYYY>/<MM>` from its timestamp.
pub fn resolve_path(base_path: &str, modified: &str) -> Result<PathBuf> {
    let (year, month) = year_month(modified)?;
    Ok(expand_home(base_path).join(year).join(month))
}

/// `<dir>/<hash>.memo`
pub fn memo_file(dir: &Path, hash: &str) -> PathBuf {
    dir.join(format!("{hash}.memo"))
}
