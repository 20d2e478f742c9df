//! Chains of core steps, the way the front end pipes them.

use memo_core::{
    Codec, Entries, IndexEntry, JsonCodec, Memo, capture_at, content_hash, tag_it, tagged,
};
use proptest::prelude::*;

const TS: &str = "09.07.2022 22:26:15";

proptest! {
    #[test]
    fn hash_depends_on_content_only(
        content in ".*",
        tags_a in proptest::collection::vec("[a-z]{0,8}", 0..4),
        tags_b in proptest::collection::vec("[a-z]{0,8}", 0..4),
        day in 1u32..28,
    ) {
        let mut a = Memo::new(content.clone(), TS);
        a.tags = tags_a;
        let mut b = Memo::new(content.clone(), format!("{day:02}.01.2020 08:00:00"));
        b.tags = tags_b;
        prop_assert_eq!(a.hash().unwrap(), b.hash().unwrap());
        prop_assert_eq!(a.hash().unwrap(), content_hash(&content).unwrap());
    }

    #[test]
    fn tag_append_grows_by_one(
        tags in proptest::collection::vec("[a-z]{1,8}", 0..5),
        tag in "[a-z]{1,8}",
    ) {
        let mut memo = Memo::new("body\n", TS);
        memo.tags = tags.clone();
        let input = JsonCodec.encode(&memo).unwrap();
        let out = tag_it(input.as_slice(), &tag).into_result().unwrap();
        let back: Memo = JsonCodec.decode(out.as_slice()).unwrap();
        prop_assert_eq!(back.tags.len(), tags.len() + 1);
        prop_assert_eq!(back.content, memo.content);
        prop_assert_eq!(back.modified, memo.modified);
    }
}

#[test]
fn capture_then_tag_then_index() {
    let captured = capture_at("first line\nsecond line\n".as_bytes(), TS)
        .into_result()
        .unwrap();
    let tagged_memo = tag_it(captured.as_slice(), "work").into_result().unwrap();
    let memo: Memo = JsonCodec.decode(tagged_memo.as_slice()).unwrap();
    assert_eq!(memo.content, "first line\nsecond line\n");

    let mut entries = Entries::new();
    entries.insert(memo.hash().unwrap(), IndexEntry::from_memo(&memo, "base/2022/07"));
    let index = JsonCodec.encode(&entries).unwrap();

    let hit = tagged(index.as_slice(), &["work"]).into_result().unwrap();
    assert_eq!(hit, index);

    let miss = tagged(index.as_slice(), &["home"]).into_result().unwrap();
    assert_eq!(miss, b"{}");
}
