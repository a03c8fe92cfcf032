//! Delta entries, the elements a document is made of.
//!
//! A document is a flat, position-indexed sequence of entries.  Each entry is
//! either an inline text run or a block marker, and carries an attribute map.
//! Lengths are UTF-16 code units for text and exactly 1 for a block.
//!
//! The entry list doubles as the interchange format: an entry serializes as
//! `{"insert": string, "length": n, "attributes": {...}}` for text and
//! `{"insert": {"block": tag}, "length": 1, "attributes": {...}}` for a
//! block, with `attributes` omitted when empty.

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::attributes::Attributes;
use crate::utf16;

/// Closed set of block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    Blockquote,
    UnorderedList,
    Unordered,
    OrderedList,
    Ordered,
}

/// What an entry holds: a text run or a single block marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Block(BlockType),
}

impl Payload {
    /// Semantic length in units: UTF-16 code units for text, 1 for a block.
    pub fn length(&self) -> usize {
        match self {
            Payload::Text(s) => utf16::len(s),
            Payload::Block(_) => 1,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Payload::Block(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Block(_) => None,
        }
    }
}

/// One document entry: a payload plus its formatting attributes.
///
/// The same shape is reused by the `Insert` and `Swap` operations; the
/// operation kind lives on [`Op`](crate::op::Op), not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    pub payload: Payload,
    pub attributes: Attributes,
}

impl Delta {
    pub fn text(s: impl Into<String>) -> Self {
        Self {
            payload: Payload::Text(s.into()),
            attributes: Attributes::new(),
        }
    }

    pub fn text_with(s: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            payload: Payload::Text(s.into()),
            attributes,
        }
    }

    pub fn block(block: BlockType) -> Self {
        Self {
            payload: Payload::Block(block),
            attributes: Attributes::new(),
        }
    }

    pub fn block_with(block: BlockType, attributes: Attributes) -> Self {
        Self {
            payload: Payload::Block(block),
            attributes,
        }
    }

    pub fn length(&self) -> usize {
        self.payload.length()
    }
}

/// Total unit length of an entry sequence.
pub fn delta_length(delta: &[Delta]) -> usize {
    delta.iter().map(Delta::length).sum()
}

// ── Wire format ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct BlockRef<'a> {
    block: &'a BlockType,
}

pub(crate) fn serialize_insert_value<M: SerializeMap>(
    map: &mut M,
    key: &'static str,
    payload: &Payload,
) -> Result<(), M::Error> {
    match payload {
        Payload::Text(s) => map.serialize_entry(key, s),
        Payload::Block(b) => map.serialize_entry(key, &BlockRef { block: b }),
    }
}

impl Serialize for Delta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        serialize_insert_value(&mut map, "insert", &self.payload)?;
        map.serialize_entry("length", &self.length())?;
        if !self.attributes.is_empty() {
            map.serialize_entry("attributes", &self.attributes)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawInsert {
    Text(String),
    Block { block: BlockType },
}

impl From<RawInsert> for Payload {
    fn from(raw: RawInsert) -> Payload {
        match raw {
            RawInsert::Text(s) => Payload::Text(s),
            RawInsert::Block { block } => Payload::Block(block),
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    insert: RawInsert,
    #[serde(default)]
    length: Option<usize>,
    #[serde(default)]
    attributes: Attributes,
}

impl<'de> Deserialize<'de> for Delta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEntry::deserialize(deserializer)?;
        let entry = Delta {
            payload: raw.insert.into(),
            attributes: raw.attributes,
        };
        if let Some(length) = raw.length {
            if length != entry.length() {
                return Err(D::Error::custom(format!(
                    "entry length {} does not match payload length {}",
                    length,
                    entry.length()
                )));
            }
        }
        Ok(entry)
    }
}
