use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::deserialize_object;
use crate::memo::Memo;

/// Hash-keyed index rows, sorted by hash.
pub type Entries = BTreeMap<String, IndexEntry>;

/// A set of tags. Encoded as `{"tag": true, ...}` on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// True when every tag in `required` is present. Empty `required` matches.
    pub fn contains_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|t| self.0.contains(t.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|tag| (tag, true)))
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, bool>>::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(tag, on)| on.then_some(tag))
            .collect())
    }
}

/// Where a stored memo lives and what it is tagged with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    #[serde(rename = "Tags")]
    pub tags: TagSet,
    /// Directory holding `<hash>.memo`.
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Modified")]
    pub modified: String,
}

#[derive(Default, Deserialize)]
struct EntryFields {
    #[serde(rename = "Tags", alias = "tags", default)]
    tags: TagSet,
    #[serde(rename = "Path", alias = "path", default)]
    path: String,
    #[serde(rename = "Modified", alias = "modified", default)]
    modified: String,
}

impl<'de> Deserialize<'de> for IndexEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields: EntryFields = deserialize_object(deserializer)?;
        Ok(Self {
            tags: fields.tags,
            path: fields.path,
            modified: fields.modified,
        })
    }
}

impl IndexEntry {
    /// Entry for `memo` stored under `path`; duplicate tags collapse.
    pub fn from_memo(memo: &Memo, path: impl Into<String>) -> Self {
        Self {
            tags: memo.tags.iter().cloned().collect(),
            path: path.into(),
            modified: memo.modified.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, JsonCodec};
    use crate::error::MemoError;

    #[test]
    fn test_tags_encode_as_map_of_true() {
        let tags: TagSet = ["b", "a"].into_iter().collect();
        let json = serde_json::to_string(&tags).unwrap();
        assert_eq!(json, r#"{"a":true,"b":true}"#);
    }

    #[test]
    fn test_tags_decode_drops_false_and_null() {
        let tags: TagSet = serde_json::from_str(r#"{"a":true,"b":false}"#).unwrap();
        assert!(tags.contains("a"));
        assert!(!tags.contains("b"));

        let tags: TagSet = serde_json::from_str("null").unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn test_contains_all() {
        let tags: TagSet = ["a", "b"].into_iter().collect();
        assert!(tags.contains_all(&["a", "b"]));
        assert!(tags.contains_all::<&str>(&[]));
        assert!(!tags.contains_all(&["a", "c"]));
        assert!(!tags.contains_all(&["A"]));
    }

    #[test]
    fn test_from_memo_dedups_tags() {
        let mut memo = Memo::new("x\n", "09.07.2022 22:26:15");
        memo.append_tag("a");
        memo.append_tag("a");
        memo.append_tag("b");
        let entry = IndexEntry::from_memo(&memo, "base/2022/07");
        assert_eq!(entry.tags.len(), 2);
        assert_eq!(entry.path, "base/2022/07");
        assert_eq!(entry.modified, "09.07.2022 22:26:15");
    }

    #[test]
    fn test_entry_rejects_arrays() {
        for input in ["[]", r#"[{"a":true},"p","09.07.2022 22:26:15"]"#] {
            assert!(
                serde_json::from_str::<IndexEntry>(input).is_err(),
                "{input} should not decode as an entry"
            );
        }
    }

    #[test]
    fn test_index_with_array_entry_is_decode_error() {
        let raw = r#"{"h":[{"a":true},"p","09.07.2022 22:26:15"]}"#;
        let err = JsonCodec.decode::<Entries, _>(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, MemoError::Decode(_)));
    }

    #[test]
    fn test_entry_wire_shape() {
        let json = r#"{"Tags":{"test":true},"Path":"testdata/2022/07","Modified":"09.07.2022 22:26:15"}"#;
        let entry: IndexEntry = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&entry).unwrap(), json);
    }
}
