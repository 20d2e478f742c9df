use crate::memo::Memo;

/// How much of a memo `stdout` prints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Content only.
    #[default]
    Short,
    /// Timestamp and content.
    Long,
    /// Labelled timestamp, tags and content.
    Verbose,
}

impl From<&str> for Verbosity {
    /// Unrecognized names fall back to [`Verbosity::Short`].
    fn from(s: &str) -> Self {
        match s {
            "long" => Verbosity::Long,
            "verbose" => Verbosity::Verbose,
            _ => Verbosity::Short,
        }
    }
}

/// Append one memo to `out`. Each memo starts on a fresh line.
pub fn render_memo(out: &mut String, memo: &Memo, verbosity: Verbosity) {
    out.push('\n');
    match verbosity {
        Verbosity::Short => {}
        Verbosity::Long => {
            out.push_str(&memo.modified);
            out.push('\n');
        }
        Verbosity::Verbose => {
            out.push_str("Modified: ");
            out.push_str(&memo.modified);
            out.push_str("\nTags: ");
            out.push_str(&memo.tags.join(", "));
            out.push_str("\nMemo: ");
        }
    }
    out.push_str(&memo.content);
}
