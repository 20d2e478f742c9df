//! Index filters. Both take the full mapping and return the kept subset.

use crate::error::{MemoError, Result};
use crate::index::Entries;
use crate::period::Period;

/// Keep the entries that fall into `period`.
///
/// Only [`Period::All`] has a filter; every other period is accepted by
/// parsing but reported as [`MemoError::PeriodNotImplemented`] here.
pub fn filter_by_period(entries: Entries, period: Period) -> Result<Entries> {
    match period {
        Period::All => Ok(entries),
        other => {
            tracing::warn!("period {other} has no filter");
            Err(MemoError::PeriodNotImplemented(other))
        }
    }
}

/// Keep entries carrying every tag in `required` (exact, case-sensitive).
pub fn filter_by_tags<S: AsRef<str>>(entries: Entries, required: &[S]) -> Entries {
    entries
        .into_iter()
        .filter(|(_, entry)| entry.tags.contains_all(required))
        .collect()
}
