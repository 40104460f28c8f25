//! Schema-less record model.
//!
//! A record is an ordered mapping from field name to a JSON value kind
//! (string, number, boolean, null, object, array). BSON types without a
//! JSON counterpart use their relaxed Extended JSON form.

use std::fmt;

use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One document retrieved from a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Converts a BSON document, keeping field order.
    pub fn from_document(document: Document) -> Self {
        let fields = document
            .into_iter()
            .map(|(key, value)| (key, bson_to_value(value)))
            .collect();
        Self(fields)
    }

    /// Returns the value of a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field names in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Document> for Record {
    fn from(document: Document) -> Self {
        Self::from_document(document)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Compact JSON on a single line.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn bson_to_value(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::String(s) => Value::String(s),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(d) => serde_json::Number::from_f64(d)
            .map(Value::Number)
            // NaN and infinities
            .unwrap_or_else(|| Bson::Double(d).into_relaxed_extjson()),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_value).collect()),
        Bson::Document(doc) => Value::Object(
            doc.into_iter()
                .map(|(key, value)| (key, bson_to_value(value)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}
