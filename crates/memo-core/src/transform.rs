//! Stream-to-stream steps that need nothing but their input.

use std::io::{BufRead, Read};

use crate::codec::{Codec, JsonCodec};
use crate::error::Result;
use crate::index::Entries;
use crate::memo::Memo;
use crate::pipeline::Pipeline;
use crate::query::filter_by_tags;

/// Read free text and emit it as a freshly stamped memo.
pub fn capture<R: BufRead>(input: R) -> Pipeline {
    capture_memo(Memo::capture(input)).into()
}

/// Like [`capture`] with a fixed timestamp.
pub fn capture_at<R: BufRead>(input: R, modified: &str) -> Pipeline {
    capture_memo(Memo::from_lines(input, modified)).into()
}

fn capture_memo(memo: Result<Memo>) -> Result<Vec<u8>> {
    let memo = memo?;
    tracing::debug!("captured {} bytes", memo.content.len());
    JsonCodec.encode(&memo)
}

/// Decode a memo, append `tag` (ignored when empty) and re-encode it.
pub fn tag_it<R: Read>(input: R, tag: &str) -> Pipeline {
    let run = || -> Result<Vec<u8>> {
        let mut memo: Memo = JsonCodec.decode(input)?;
        if !memo.append_tag(tag) {
            tracing::debug!("empty tag, memo left untouched");
        }
        JsonCodec.encode(&memo)
    };
    run().into()
}

/// Decode an index mapping and keep entries carrying all `tags`.
pub fn tagged<R: Read, S: AsRef<str>>(input: R, tags: &[S]) -> Pipeline {
    let run = || -> Result<Vec<u8>> {
        let entries: Entries = JsonCodec.decode(input)?;
        let total = entries.len();
        let found = filter_by_tags(entries, tags);
        tracing::debug!("tag filter kept {} of {total} entries", found.len());
        JsonCodec.encode(&found)
    };
    run().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemoError;
    use crate::index::IndexEntry;

    const TS: &str = "09.07.2022 22:26:15";

    fn encoded(memo: &Memo) -> Vec<u8> {
        JsonCodec.encode(memo).unwrap()
    }

    #[test]
    fn test_capture_emits_memo() {
        let out = capture_at("Hello world".as_bytes(), TS).into_result().unwrap();
        let memo: Memo = JsonCodec.decode(out.as_slice()).unwrap();
        assert_eq!(memo, Memo::new("Hello world\n", TS));
    }

    #[test]
    fn test_capture_stamps_now() {
        let out = capture("x".as_bytes()).into_result().unwrap();
        let memo: Memo = JsonCodec.decode(out.as_slice()).unwrap();
        assert!(crate::time::parse_timestamp(&memo.modified).is_ok());
    }

    #[test]
    fn test_tag_it_matches_pretagged_memo() {
        let pure = Memo::new("Hello world\n", TS);
        let mut pretagged = pure.clone();
        pretagged.tags = vec!["test".into()];

        let want = tag_it(encoded(&pretagged).as_slice(), "").into_result().unwrap();
        let got = tag_it(encoded(&pure).as_slice(), "test").into_result().unwrap();
        assert_eq!(want, got);
    }

    #[test]
    fn test_tag_it_leaves_content_and_time() {
        let memo = Memo::new("body\n", TS);
        let out = tag_it(encoded(&memo).as_slice(), "x").into_result().unwrap();
        let tagged: Memo = JsonCodec.decode(out.as_slice()).unwrap();
        assert_eq!(tagged.content, memo.content);
        assert_eq!(tagged.modified, memo.modified);
        assert_eq!(tagged.tags, vec!["x"]);
    }

    #[test]
    fn test_tag_it_bad_input() {
        let p = tag_it("nope".as_bytes(), "x");
        assert!(matches!(
            p.error().map(|e| &e.source),
            Some(MemoError::Decode(_))
        ));
    }

    #[test]
    fn test_tag_it_rejects_array_memo() {
        let p = tag_it(r#"[null,"09.07.2022 22:26:15","body"]"#.as_bytes(), "x");
        assert!(matches!(
            p.error().map(|e| &e.source),
            Some(MemoError::Decode(_))
        ));
    }

    #[test]
    fn test_tagged_rejects_array_entries() {
        let p = tagged(r#"{"h":[{"a":true},"p","09.07.2022 22:26:15"]}"#.as_bytes(), &["a"]);
        assert!(matches!(
            p.error().map(|e| &e.source),
            Some(MemoError::Decode(_))
        ));
    }

    #[test]
    fn test_tagged_filters_stream() {
        let mut entries = Entries::new();
        for (hash, tags) in [("1", vec!["a"]), ("2", vec!["a", "b"]), ("3", vec!["b"])] {
            entries.insert(
                hash.into(),
                IndexEntry {
                    tags: tags.into_iter().collect(),
                    path: "p".into(),
                    modified: TS.into(),
                },
            );
        }
        let input = JsonCodec.encode(&entries).unwrap();

        let out = tagged(input.as_slice(), &["a", "b"]).into_result().unwrap();
        let kept: Entries = JsonCodec.decode(out.as_slice()).unwrap();
        assert_eq!(kept.keys().collect::<Vec<_>>(), vec!["2"]);

        let out = tagged::<_, &str>(input.as_slice(), &[]).into_result().unwrap();
        assert_eq!(out, input);
    }
}
