// Copyright (C) 2026  TagLog Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Tag values and tag maps.
//!
//! A tag is a key/value metadatum attached to a log record. The sink only
//! performs shallow top-level structuring, so every value that reaches it
//! must be a scalar: structured values are serialized to their compact JSON
//! text at the call boundary and carried as [`TagValue::Json`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Tag key carrying the owning module's name on every record.
pub const MODULE_NAME_KEY: &str = "moduleName";

/// Ordered mapping from tag key to value. Keys are unique; merging is
/// last-write-wins.
pub type TagMap = BTreeMap<String, TagValue>;

/// A single tag value.
///
/// The variant set is closed: a sink never sees anything it cannot render as
/// a scalar. Structured input is converted through [`TagValue::from`] on
/// [`serde_json::Value`], which pre-serializes arrays, objects and null.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// A plain string.
    Str(String),

    /// A signed integer.
    Int(i64),

    /// A floating point number.
    Float(f64),

    /// A boolean.
    Bool(bool),

    /// Pre-serialized structured text. Serializes as a JSON *string*
    /// containing the text, never as a nested structure.
    Json(String),
}

impl TagValue {
    /// Serialize an arbitrary value into a tag at the call boundary.
    ///
    /// Scalars become scalar variants; everything else becomes its compact
    /// JSON text.
    pub fn structured<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(TagValue::from(serde_json::to_value(value)?))
    }

    /// The value as it appears on the wire.
    pub fn to_wire(&self) -> serde_json::Value {
        match self {
            TagValue::Str(s) => serde_json::Value::String(s.clone()),
            TagValue::Int(i) => serde_json::Value::from(*i),
            TagValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            TagValue::Bool(b) => serde_json::Value::Bool(*b),
            TagValue::Json(text) => serde_json::Value::String(text.clone()),
        }
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Str(s) => serializer.serialize_str(s),
            TagValue::Int(i) => serializer.serialize_i64(*i),
            TagValue::Float(f) => serializer.serialize_f64(*f),
            TagValue::Bool(b) => serializer.serialize_bool(*b),
            TagValue::Json(text) => serializer.serialize_str(text),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Str(s) => f.write_str(s),
            TagValue::Int(i) => write!(f, "{i}"),
            TagValue::Float(v) => write!(f, "{v}"),
            TagValue::Bool(b) => write!(f, "{b}"),
            TagValue::Json(text) => f.write_str(text),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Str(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Str(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Int(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        TagValue::Int(value.into())
    }
}

impl From<u32> for TagValue {
    fn from(value: u32) -> Self {
        TagValue::Int(value.into())
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Float(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

impl From<serde_json::Value> for TagValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => TagValue::Str(s),
            serde_json::Value::Bool(b) => TagValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    TagValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    TagValue::Float(f)
                } else {
                    TagValue::Json(n.to_string())
                }
            }
            // null, arrays and objects travel as pre-serialized text
            other => TagValue::Json(other.to_string()),
        }
    }
}

/// Merge `extra` over `base`, extra keys winning on collision.
///
/// Always returns a fresh map: a logger's stored base tags are never mutated
/// by a single call's merge.
pub fn merged(base: &TagMap, extra: TagMap) -> TagMap {
    let mut tags = base.clone();
    tags.extend(extra);
    tags
}
