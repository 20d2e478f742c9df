use std::io::{BufRead, Read, Write};

use serde::{Deserialize, Deserializer, Serialize};

use crate::codec::deserialize_object;
use crate::error::{MemoError, Result};
use crate::hash::content_hash;
use crate::time::now_timestamp;

/// One note: free text plus tags and the time it was captured.
///
/// Field names on the wire are `Tags`, `Modified` and `Content`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Memo {
    #[serde(rename = "Tags")]
    pub tags: Vec<String>,
    #[serde(rename = "Modified")]
    pub modified: String,
    #[serde(rename = "Content")]
    pub content: String,
}

#[derive(Default, Deserialize)]
struct MemoFields {
    #[serde(
        rename = "Tags",
        alias = "tags",
        default,
        deserialize_with = "null_as_empty"
    )]
    tags: Vec<String>,
    #[serde(rename = "Modified", alias = "modified", default)]
    modified: String,
    #[serde(rename = "Content", alias = "content", default)]
    content: String,
}

impl<'de> Deserialize<'de> for Memo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let fields: MemoFields = deserialize_object(deserializer)?;
        Ok(Self {
            tags: fields.tags,
            modified: fields.modified,
            content: fields.content,
        })
    }
}

impl Memo {
    pub fn new(content: impl Into<String>, modified: impl Into<String>) -> Self {
        Self {
            tags: Vec::new(),
            modified: modified.into(),
            content: content.into(),
        }
    }

    /// Collect every input line, each terminated by `\n`.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
    pub fn from_lines<R: BufRead>(mut reader: R, modified: impl Into<String>) -> Result<Self> {
        let mut content = String::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| MemoError::io("<input>", e))?;
            if read == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            content.push_str(&String::from_utf8_lossy(&line));
            content.push('\n');
        }
        Ok(Self::new(content, modified))
    }

    /// [`Memo::from_lines`] stamped with the current local time.
    pub fn capture<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_lines(reader, now_timestamp())
    }

    /// Content hash, the memo's identity in the index.
    pub fn hash(&self) -> Result<String> {
        content_hash(&self.content)
    }

    /// Append a tag. Empty tags are ignored; returns whether one was added.
    pub fn append_tag(&mut self, tag: &str) -> bool {
        if tag.is_empty() {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Write the compact on-disk form followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self).map_err(MemoError::Encode)?;
        writer
            .write_all(b"\n")
            .map_err(|e| MemoError::io("<memo>", e))
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(MemoError::Decode)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
