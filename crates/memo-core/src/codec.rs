//! Serialization strategy for memos and indexes.

use std::io::Read;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::error::{MemoError, Result};

/// Turns values into pipeline bytes and back.
pub trait Codec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;
    fn decode<T: DeserializeOwned, R: Read>(&self, reader: R) -> Result<T>;
}

/// JSON, pretty-printed with tab indentation.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        value.serialize(&mut ser).map_err(MemoError::Encode)?;
        Ok(buf)
    }

    fn decode<T: DeserializeOwned, R: Read>(&self, reader: R) -> Result<T> {
        serde_json::from_reader(reader).map_err(MemoError::Decode)
    }
}

/// Decode a record from a JSON object only. `null` yields the default,
/// arrays and scalars are rejected.
pub(crate) fn deserialize_object<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Option::<Map<String, Value>>::deserialize(deserializer)? {
        Some(fields) => serde_json::from_value(Value::Object(fields)).map_err(D::Error::custom),
        None => Ok(T::default()),
    }
}
