//! Operations, the elements of a transaction's emitted list.
//!
//! An operation list is applied left to right by
//! [`process_operations`](crate::apply::process_operations):
//! - `Retain(n, None)` advances the cursor past `n` units it does not alter.
//! - `Retain(n, Some(attrs))` is an overlay: it merges `attrs` into every
//!   entry the retained span touches.
//! - `Delete(n)` removes `n` units at the cursor.
//! - `Insert` places a new entry at the cursor.
//! - `Swap` replaces the single unit at the cursor with a new entry.

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::attributes::Attributes;
use crate::delta::{serialize_insert_value, Delta, Payload, RawInsert};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Insert(Delta),
    Retain(usize, Option<Attributes>),
    Delete(usize),
    Swap(Delta),
}

impl Op {
    pub fn insert(entry: Delta) -> Self {
        Op::Insert(entry)
    }

    pub fn retain(n: usize) -> Self {
        Op::Retain(n, None)
    }

    pub fn retain_with(n: usize, attributes: Attributes) -> Self {
        Op::Retain(n, Some(attributes))
    }

    pub fn delete(n: usize) -> Self {
        Op::Delete(n)
    }

    pub fn swap(entry: Delta) -> Self {
        Op::Swap(entry)
    }

    /// Payload length of an `Insert` or `Swap`, 0 otherwise.
    pub fn insert_length(&self) -> usize {
        match self {
            Op::Insert(e) | Op::Swap(e) => e.length(),
            _ => 0,
        }
    }
}

// ── Wire format ───────────────────────────────────────────────────────────

impl Serialize for Op {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Op::Insert(e) => {
                serialize_insert_value(&mut map, "insert", &e.payload)?;
                map.serialize_entry("length", &e.length())?;
                if !e.attributes.is_empty() {
                    map.serialize_entry("attributes", &e.attributes)?;
                }
            }
            Op::Retain(n, attrs) => {
                map.serialize_entry("retain", n)?;
                if let Some(attrs) = attrs {
                    map.serialize_entry("attributes", attrs)?;
                }
            }
            Op::Delete(n) => {
                map.serialize_entry("delete", n)?;
            }
            Op::Swap(e) => {
                serialize_insert_value(&mut map, "swap", &e.payload)?;
                map.serialize_entry("length", &e.length())?;
                if !e.attributes.is_empty() {
                    map.serialize_entry("attributes", &e.attributes)?;
                }
            }
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct RawOp {
    #[serde(default)]
    insert: Option<RawInsert>,
    #[serde(default)]
    retain: Option<usize>,
    #[serde(default)]
    delete: Option<usize>,
    #[serde(default)]
    swap: Option<RawInsert>,
    #[serde(default)]
    attributes: Option<Attributes>,
}

impl<'de> Deserialize<'de> for Op {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawOp::deserialize(deserializer)?;
        match (raw.insert, raw.retain, raw.delete, raw.swap) {
            (Some(ins), None, None, None) => Ok(Op::Insert(Delta {
                payload: Payload::from(ins),
                attributes: raw.attributes.unwrap_or_default(),
            })),
            (None, Some(n), None, None) => Ok(Op::Retain(n, raw.attributes)),
            (None, None, Some(n), None) => Ok(Op::Delete(n)),
            (None, None, None, Some(swap)) => Ok(Op::Swap(Delta {
                payload: Payload::from(swap),
                attributes: raw.attributes.unwrap_or_default(),
            })),
            _ => Err(D::Error::custom(
                "operation must have exactly one of insert/retain/delete/swap",
            )),
        }
    }
}
